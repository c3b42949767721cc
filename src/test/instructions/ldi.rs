use super::*;

#[test]
fn loads_a_16_bit_immediate() {
    let (cu, _, _) = run_block(&[make_ldi(5, 0x1234), stop!()]);

    assert_eq!(cu.reg(0, 5), 0x1234);
}

#[test]
fn immediate_is_zero_extended() {
    let (cu, _, _) = run_block(&[make_ldi(5, 0xFFFF), stop!()]);

    assert_eq!(cu.reg(0, 5), 0xFFFF);
}

#[test]
fn wide_constant_sequence() {
    // the five-word shape the assembler expands wide movs into
    let mut words = load_const(0, 0xDEAD_BEEF);
    words.push(stop!());
    let (cu, _, _) = run_block(&words);

    for tidx in 0..4 {
        assert_eq!(cu.reg(tidx, 0) as u32, 0xDEAD_BEEF);
    }
}
