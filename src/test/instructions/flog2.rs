use super::*;

#[test]
fn exact_for_powers_of_two() {
    let mut words = load_const(1, 1024.0_f32.to_bits());
    words.push(fpu!(FLOG2, 2, 1, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2), float_bits(10.0));
}

#[test]
fn zero_gives_negative_infinity() {
    let mut words = load_const(1, 0.0_f32.to_bits());
    words.push(fpu!(FLOG2, 2, 1, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2), float_bits(f32::NEG_INFINITY));
}
