use super::*;

#[test]
fn register_form_is_signed() {
    // -2 compares below 1 even though its bit pattern is larger
    let mut words = load_const(1, (-2i32) as u32);
    words.push(make_ldi(2, 1));
    words.push(iu!(MAX, 3, 1, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), 1);
}

#[test]
fn immediate_form() {
    let (cu, _, _) = run_block(&[make_ldi(1, 9), iu!(MAXI, 2, 1, 200), stop!()]);

    assert_eq!(cu.reg(0, 2), 200);
}
