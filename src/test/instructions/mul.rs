use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 6),
        make_ldi(2, 7),
        iu!(MUL, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 42);
}

#[test]
fn immediate_form_truncates_to_32_bits() {
    let mut words = load_const(1, 0x4000_0000);
    words.push(iu!(MULI, 2, 1, 8));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2), 0);
}
