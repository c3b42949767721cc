use super::*;

#[test]
fn rounds_toward_zero() {
    let mut words = load_const(1, 2.9_f32.to_bits());
    words.extend(load_const(2, (-2.9_f32).to_bits()));
    words.push(fpu!(FTOI, 3, 1, 1));
    words.push(fpu!(FTOI, 4, 2, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), 2);
    assert_eq!(cu.reg(0, 4), -2);
}
