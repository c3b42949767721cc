use super::*;

#[test]
fn comparison_is_signed() {
    let mut words = load_const(1, (-5i32) as u32);
    words.push(make_ldi(2, 3));
    words.push(iu!(CMPLT, 3, 1, 2));
    words.push(iu!(CMPLT, 4, 2, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), 1);
    assert_eq!(cu.reg(0, 4), 0);
}

#[test]
fn equal_values_are_not_less() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 17),
        make_ldi(2, 17),
        iu!(CMPLT, 3, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 3), 0);
}

#[test]
fn immediate_form() {
    let (cu, _, _) = run_block(&[make_ldi(1, 4), iu!(CMPLTI, 2, 1, 9), stop!()]);

    assert_eq!(cu.reg(0, 2), 1);
}
