use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 0b1100),
        make_ldi(2, 0b1010),
        iu!(XOR, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 0b0110);
}

#[test]
fn immediate_form_clears_with_self() {
    let (cu, _, _) = run_block(&[make_ldi(1, 0xAA), iu!(XORI, 1, 1, 0xAA), stop!()]);

    assert_eq!(cu.reg(0, 1), 0);
}
