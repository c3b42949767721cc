use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 50),
        make_ldi(2, 8),
        iu!(SUB, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 42);
}

#[test]
fn immediate_form_goes_negative() {
    let (cu, _, _) = run_block(&[make_ldi(1, 3), iu!(SUBI, 2, 1, 7), stop!()]);

    assert_eq!(cu.reg(0, 2), -4);
}
