use super::*;
use std::convert::TryInto;

#[test]
fn brnz_taken_forward() {
    // guard is non-zero: the ldi below the branch is skipped
    let (cu, _, _) = run_block(&[
        make_ldi(1, 1),
        bru!(BRNZ, 0, 1, 1),
        make_ldi(2, 0xAAAA),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 2), 0);
}

#[test]
fn brnz_not_taken_falls_through() {
    let (cu, _, _) = run_block(&[
        bru!(BRNZ, 0, 1, 1),
        make_ldi(2, 0xAAAA),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 2), 0xAAAA);
}

#[test]
fn brz_taken_forward() {
    let (cu, _, _) = run_block(&[
        bru!(BRZ, 0, 1, 1),
        make_ldi(2, 0xAAAA),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 2), 0);
}

#[test]
fn backward_branch_loops() {
    // counts r0 up to 4: the loop body runs until r1 hits zero
    let (cu, _, sink) = run_block(&[
        make_ldi(0, 0),
        iu!(ADDI, 0, 0, 1),
        iu!(SUBI, 1, 0, 4),
        bru!(BRNZ, 0, 1, 0xFD), // -3: back to the addi
        stop!(),
    ]);

    for tidx in 0..4 {
        assert_eq!(cu.reg(tidx, 0), 4);
        // ldi + 4 iterations of (addi, subi, brnz); stop is not traced
        assert_eq!(sink.block(0).unwrap().step_count(tidx.try_into().unwrap()), 13);
    }
}

#[test]
fn displacement_is_relative_to_the_next_instruction() {
    // offset 0 is a plain fall-through
    let (cu, _, _) = run_block(&[
        make_ldi(1, 1),
        bru!(BRNZ, 0, 1, 0),
        make_ldi(2, 5),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 2), 5);
}

#[test]
fn threads_can_diverge() {
    // odd threads skip the ldi
    let (cu, _, _) = run_block(&[
        iu!(TID, 0, 0, 0),
        iu!(ANDI, 1, 0, 1),
        bru!(BRNZ, 0, 1, 1),
        make_ldi(2, 7),
        stop!(),
    ]);

    assert_eq!(cu.reg(0, 2), 7);
    assert_eq!(cu.reg(1, 2), 0);
    assert_eq!(cu.reg(2, 2), 7);
    assert_eq!(cu.reg(3, 2), 0);
}
