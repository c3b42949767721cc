use super::*;

fn run_with_params(dp_addr: u32, words: &[Word], args: &[u32]) -> ComputeUnit {
    let mut memory = memory_with_program(1024, words);
    memory.write_words(dp_addr, args).unwrap();
    let (cu, _) = run_in(
        &mut memory,
        DispatchParams {
            pc: 0,
            dp_addr,
            tb_size: 4,
            n_blocks: 1,
            tgroup_id: 0,
        },
        4,
    );
    cu
}

#[test]
fn reads_indexed_slots() {
    let cu = run_with_params(
        0x200,
        &[make_ldparam(0, 0), make_ldparam(1, 1), make_ldparam(2, 2), stop!()],
        &[0x40, 0x80, 0xC0],
    );

    for tidx in 0..4 {
        assert_eq!(cu.reg(tidx, 0), 0x40);
        assert_eq!(cu.reg(tidx, 1), 0x80);
        assert_eq!(cu.reg(tidx, 2), 0xC0);
    }
}

#[test]
fn out_of_bounds_slot_faults() {
    let mut memory = memory_with_program(1024, &[make_ldparam(0, 512), stop!()]);
    let err = try_run_in(
        &mut memory,
        DispatchParams {
            pc: 0,
            dp_addr: 0x200,
            tb_size: 4,
            n_blocks: 1,
            tgroup_id: 0,
        },
        4,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ExecError::OutOfBounds {
            address: 0x200 + 512 * 4,
            width: 4
        }
    );
}
