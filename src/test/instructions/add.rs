use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 42),
        make_ldi(2, 64),
        iu!(ADD, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 106);
}

#[test]
fn immediate_form() {
    let (cu, _, _) = run_block(&[make_ldi(1, 100), iu!(ADDI, 2, 1, 255), stop!()]);

    assert_eq!(cu.reg(0, 2), 355);
}

#[test]
fn wraps_on_overflow() {
    let mut words = load_const(1, i32::max_value() as u32);
    words.push(iu!(ADDI, 2, 1, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2), i32::min_value());
}
