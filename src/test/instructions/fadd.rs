use super::*;

#[test]
fn adds_bit_patterns_as_floats() {
    let mut words = load_const(1, 262.562_f32.to_bits());
    words.extend(load_const(2, (-82.35_f32).to_bits()));
    words.push(fpu!(FADD, 3, 1, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), float_bits(262.562_f32 + -82.35_f32));
}

#[test]
fn infinity_propagates_without_trapping() {
    let mut words = load_const(1, f32::INFINITY.to_bits());
    words.extend(load_const(2, 1.0_f32.to_bits()));
    words.push(fpu!(FADD, 3, 1, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), float_bits(f32::INFINITY));
}
