use super::*;

#[test]
fn reciprocal() {
    let mut words = load_const(1, 4.0_f32.to_bits());
    words.push(fpu!(FRECIP, 2, 1, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2), float_bits(0.25));
}

#[test]
fn division_by_zero_gives_infinity() {
    let mut words = load_const(1, 0.0_f32.to_bits());
    words.push(fpu!(FRECIP, 2, 1, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2), float_bits(f32::INFINITY));
}
