use super::*;

#[test]
fn register_form_is_signed() {
    let mut words = load_const(1, (-42i32) as u32);
    words.push(make_ldi(2, 7));
    words.push(iu!(DIV, 3, 1, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), -6);
}

#[test]
fn immediate_form_truncates_toward_zero() {
    let (cu, _, _) = run_block(&[make_ldi(1, 7), iu!(DIVI, 2, 1, 2), stop!()]);

    assert_eq!(cu.reg(0, 2), 3);
}

#[test]
fn division_by_zero_yields_zero() {
    let (cu, _, _) = run_block(&[make_ldi(1, 123), iu!(DIV, 3, 1, 2), stop!()]);

    assert_eq!(cu.reg(0, 3), 0);
}

#[test]
fn min_by_minus_one_wraps() {
    let mut words = load_const(1, i32::min_value() as u32);
    words.extend(load_const(2, (-1i32) as u32));
    words.push(iu!(DIV, 3, 1, 2));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), i32::min_value());
}
