use super::*;

#[test]
fn thread_and_warp_ids() {
    let (cu, _, _) = run_block(&[iu!(TID, 0, 0, 0), iu!(WID, 1, 0, 0), stop!()]);

    for tidx in 0..4 {
        assert_eq!(cu.reg(tidx, 0), tidx as i32);
        assert_eq!(cu.reg(tidx, 1), 0);
    }
}

#[test]
fn block_ids() {
    let mut memory = memory_with_program(1024, &[iu!(BID, 0, 0, 0), iu!(TBID, 1, 0, 0), stop!()]);
    let (cu, sink) = run_in(
        &mut memory,
        DispatchParams {
            pc: 0,
            dp_addr: 0,
            tb_size: 4,
            n_blocks: 3,
            tgroup_id: 0,
        },
        4,
    );

    // registers hold the values of the last block
    for tidx in 0..4 {
        assert_eq!(cu.reg(tidx, 0), 2);
        assert_eq!(cu.reg(tidx, 1), 2 * 4 + tidx as i32);
    }
    // earlier blocks saw their own id
    let block0 = sink.block(0).unwrap();
    assert_eq!(block0.history(1, 0).unwrap()[0].1, 0);
    assert_eq!(block0.history(1, 1).unwrap()[0].1, 1);
}

#[test]
fn parameter_address() {
    let mut memory = memory_with_program(1024, &[iu!(DPA, 2, 0, 0), stop!()]);
    let (cu, _) = run_in(
        &mut memory,
        DispatchParams {
            pc: 0,
            dp_addr: 0x200,
            tb_size: 4,
            n_blocks: 1,
            tgroup_id: 0,
        },
        4,
    );

    assert_eq!(cu.reg(0, 2), 0x200);
}
