use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 0b1100),
        make_ldi(2, 0b0011),
        iu!(OR, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 0b1111);
}

#[test]
fn immediate_form() {
    let (cu, _, _) = run_block(&[make_ldi(1, 0x1200), iu!(ORI, 2, 1, 0x34), stop!()]);

    assert_eq!(cu.reg(0, 2), 0x1234);
}
