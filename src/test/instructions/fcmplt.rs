use super::*;

#[test]
fn writes_an_integer_flag() {
    let mut words = load_const(1, (-1.5_f32).to_bits());
    words.extend(load_const(2, 0.5_f32.to_bits()));
    words.push(fpu!(FCMPLT, 3, 1, 2));
    words.push(fpu!(FCMPLT, 4, 2, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), 1);
    assert_eq!(cu.reg(0, 4), 0);
}

#[test]
fn nan_compares_false() {
    let mut words = load_const(1, f32::NAN.to_bits());
    words.extend(load_const(2, 0.0_f32.to_bits()));
    words.push(fpu!(FCMPLT, 3, 1, 2));
    words.push(fpu!(FCMPLT, 4, 2, 1));
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    assert_eq!(cu.reg(0, 3), 0);
    assert_eq!(cu.reg(0, 4), 0);
}
