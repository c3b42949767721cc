use super::*;

#[test]
fn converts_signed_integers() {
    let mut words = load_const(1, (-7i32) as u32);
    words.push(fpu!(ITOF, 2, 1, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2), float_bits(-7.0));
}
