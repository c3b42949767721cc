use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 3),
        make_ldi(2, 4),
        iu!(SHL, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 48);
}

#[test]
fn immediate_form() {
    let (cu, _, _) = run_block(&[make_ldi(1, 1), iu!(SHLI, 2, 1, 31), stop!()]);

    assert_eq!(cu.reg(0, 2), i32::min_value());
}

#[test]
fn amount_is_taken_modulo_32() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 5),
        make_ldi(2, 33),
        iu!(SHL, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 10);
}
