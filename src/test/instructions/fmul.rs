use super::*;

#[test]
fn multiplies() {
    let mut words = load_const(1, 1.5_f32.to_bits());
    words.extend(load_const(2, (-2.0_f32).to_bits()));
    words.push(fpu!(FMUL, 3, 1, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), float_bits(-3.0));
}

#[test]
fn overflow_goes_to_infinity() {
    let mut words = load_const(1, f32::MAX.to_bits());
    words.extend(load_const(2, 2.0_f32.to_bits()));
    words.push(fpu!(FMUL, 3, 1, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), float_bits(f32::INFINITY));
}
