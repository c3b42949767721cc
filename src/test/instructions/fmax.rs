use super::*;

#[test]
fn picks_the_larger_value() {
    let mut words = load_const(1, 2.5_f32.to_bits());
    words.extend(load_const(2, (-7.0_f32).to_bits()));
    words.push(fpu!(FMAX, 3, 1, 2));
    words.push(fpu!(FMAX, 4, 2, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), float_bits(2.5));
    assert_eq!(cu.reg(0, 4), float_bits(2.5));
}
