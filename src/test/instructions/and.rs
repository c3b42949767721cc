use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 0b1100),
        make_ldi(2, 0b1010),
        iu!(AND, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 0b1000);
}

#[test]
fn immediate_form() {
    let (cu, _, _) = run_block(&[make_ldi(1, 0x12FF), iu!(ANDI, 2, 1, 0x0F), stop!()]);

    assert_eq!(cu.reg(0, 2), 0x0F);
}
