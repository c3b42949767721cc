use super::*;

#[test]
fn word_store() {
    let (_, memory, _) = run_block(&[
        make_ldi(1, 512),
        make_ldi(2, 0x1234),
        lsu!(SW, 1, 1, 2),
        stop!(),
    ]);

    assert_eq!(memory.read_word(512).unwrap(), 0x1234);
}

#[test]
fn byte_store_truncates() {
    let (_, memory, _) = run_block(&[
        make_ldi(1, 515),
        make_ldi(2, 0x1234),
        lsu!(SB, 1, 1, 2),
        stop!(),
    ]);

    assert_eq!(memory.read_uint(515, 1).unwrap(), 0x34);
    // neighbours untouched
    assert_eq!(memory.read_uint(514, 1).unwrap(), 0);
    assert_eq!(memory.read_uint(516, 1).unwrap(), 0);
}

#[test]
fn half_store_is_little_endian() {
    let (_, memory, _) = run_block(&[
        make_ldi(1, 514),
        make_ldi(2, 0xBEEF),
        lsu!(SH, 1, 1, 2),
        stop!(),
    ]);

    assert_eq!(memory.read_uint(514, 1).unwrap(), 0xEF);
    assert_eq!(memory.read_uint(515, 1).unwrap(), 0xBE);
}

#[test]
fn store_clears_the_address_register() {
    let (cu, _, _) = run_block(&[
        make_ldi(1, 512),
        make_ldi(2, 99),
        lsu!(SW, 1, 1, 2),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 1), 0);
    assert_eq!(cu.reg(0, 2), 99);
}

#[test]
fn unaligned_store_faults() {
    let err = run_block_err(&[make_ldi(1, 2), make_ldi(2, 1), lsu!(SW, 1, 1, 2), stop!()]);

    assert_eq!(
        err,
        ExecError::UnalignedAccess {
            address: 2,
            width: 4
        }
    );
}

#[test]
fn out_of_bounds_store_faults() {
    let mut words = load_const(1, 0x10000);
    words.push(lsu!(SB, 1, 1, 2));
    words.push(stop!());
    let err = run_block_err(&words);

    assert_eq!(
        err,
        ExecError::OutOfBounds {
            address: 0x10000,
            width: 1
        }
    );
}
