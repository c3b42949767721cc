use super::*;

#[test]
fn register_form() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 48),
        make_ldi(2, 4),
        iu!(SHR, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 3);
}

#[test]
fn immediate_form_preserves_the_sign() {
    let mut words = load_const(1, 0x8000_0000);
    words.push(iu!(SHRI, 2, 1, 4));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 2) as u32, 0xF800_0000);
}

#[test]
fn amount_is_taken_modulo_32() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 48),
        make_ldi(2, 36),
        iu!(SHR, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 3);
}
