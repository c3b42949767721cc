use super::ExecError;
use crate::constants;
use crate::isa::*;
use crate::memory::Storage;
use num_traits::FromPrimitive;

/// Outcome of one decoded instruction on one thread. The scheduler applies
/// the program-counter update; everything register- and memory-visible has
/// already happened.
pub(super) enum ThreadStep {
    /// Fall through to the next instruction.
    Next,
    /// Taken branch; the value is the byte delta to add to the pc.
    Branch(i32),
    /// The thread reached `stop`; its pc stays put.
    Stop,
    /// The thread arrived at a barrier and suspends until release.
    Sync,
}

/// Per-block scalars a step may read.
pub(super) struct ThreadContext {
    pub tidx: usize,
    pub tb_id: u32,
    pub dp_addr: u32,
    pub warp_width: usize,
}

/// Executes one instruction for one thread against its private register
/// slice and the shared storage.
pub(super) fn step(
    regs: &mut [i32],
    storage: &mut dyn Storage,
    ctx: &ThreadContext,
    parts: &InstructionParts,
) -> Result<ThreadStep, ExecError> {
    match parts.eu {
        ExecUnit::IU => {
            let subtype = IUSubtype::from_u8(parts.subtype)
                .ok_or_else(|| ExecError::InvalidOpcode(parts.encode()))?;
            exec_iu(regs, ctx, subtype, parts);
            Ok(ThreadStep::Next)
        }
        ExecUnit::LSU => {
            let subtype = LSUSubtype::from_u8(parts.subtype)
                .ok_or_else(|| ExecError::InvalidOpcode(parts.encode()))?;
            exec_lsu(regs, storage, ctx, subtype, parts)?;
            Ok(ThreadStep::Next)
        }
        ExecUnit::BRU => {
            let subtype = BRUSubtype::from_u8(parts.subtype)
                .ok_or_else(|| ExecError::InvalidOpcode(parts.encode()))?;
            Ok(exec_bru(regs, subtype, parts))
        }
        ExecUnit::FPU => {
            let subtype = FPUSubtype::from_u8(parts.subtype)
                .ok_or_else(|| ExecError::InvalidOpcode(parts.encode()))?;
            exec_fpu(regs, subtype, parts);
            Ok(ThreadStep::Next)
        }
    }
}

fn exec_iu(regs: &mut [i32], ctx: &ThreadContext, subtype: IUSubtype, parts: &InstructionParts) {
    let dst = parts.dst as usize;
    let a = regs[parts.op2 as usize];
    let b = regs[parts.op1 as usize];
    let imm = i32::from(parts.op1);

    regs[dst] = match subtype {
        IUSubtype::TID => ctx.tidx as i32,
        IUSubtype::WID => 0, // single warp model
        IUSubtype::BID => ctx.tb_id as i32,
        IUSubtype::TBID => (ctx.tb_id as i32).wrapping_mul(ctx.warp_width as i32) + ctx.tidx as i32,
        IUSubtype::DPA => ctx.dp_addr as i32,

        IUSubtype::ADD => a.wrapping_add(b),
        IUSubtype::SUB => a.wrapping_sub(b),
        IUSubtype::AND => a & b,
        IUSubtype::OR => a | b,
        IUSubtype::XOR => a ^ b,
        IUSubtype::SHL => a.wrapping_shl(b as u32),
        IUSubtype::SHR => a.wrapping_shr(b as u32),
        IUSubtype::MUL => a.wrapping_mul(b),

        IUSubtype::LDI => i32::from(parts.imm16()),
        IUSubtype::ADDI => a.wrapping_add(imm),
        IUSubtype::SUBI => a.wrapping_sub(imm),
        IUSubtype::ANDI => a & imm,
        IUSubtype::ORI => a | imm,
        IUSubtype::XORI => a ^ imm,
        IUSubtype::SHLI => a.wrapping_shl(imm as u32),
        IUSubtype::SHRI => a.wrapping_shr(imm as u32),
        IUSubtype::MULI => a.wrapping_mul(imm),

        IUSubtype::CMPLT => (a < b) as i32,
        IUSubtype::CMPLTI => (a < imm) as i32,
        IUSubtype::CMPNE => (a != b) as i32,
        IUSubtype::CMPNEI => (a != imm) as i32,
        IUSubtype::MAX => a.max(b),
        IUSubtype::MAXI => a.max(imm),
        IUSubtype::DIV => div(a, b),
        IUSubtype::DIVI => div(a, imm),
    };
}

/// Signed division that never traps: x / 0 = 0, i32::MIN / -1 wraps.
fn div(dividend: i32, divisor: i32) -> i32 {
    if divisor == 0 {
        0
    } else {
        dividend.wrapping_div(divisor)
    }
}

fn exec_lsu(
    regs: &mut [i32],
    storage: &mut dyn Storage,
    ctx: &ThreadContext,
    subtype: LSUSubtype,
    parts: &InstructionParts,
) -> Result<(), ExecError> {
    let dst = parts.dst as usize;

    let (address, width) = match subtype {
        LSUSubtype::LB | LSUSubtype::SB => (regs[parts.op2 as usize] as u32, constants::BYTE_BYTES),
        LSUSubtype::LH | LSUSubtype::SH => (regs[parts.op2 as usize] as u32, constants::HALF_BYTES),
        LSUSubtype::LW | LSUSubtype::SW => (regs[parts.op2 as usize] as u32, constants::WORD_BYTES),
        LSUSubtype::LDP => (
            ctx.dp_addr
                .wrapping_add(u32::from(parts.imm16()) * constants::WORD_BYTES),
            constants::WORD_BYTES,
        ),
    };

    if address % width != 0 {
        return Err(ExecError::UnalignedAccess { address, width });
    }
    if !storage.check_range(address, width) {
        return Err(ExecError::OutOfBounds { address, width });
    }

    match subtype {
        // narrow loads zero-extend, word loads are bit-for-bit
        LSUSubtype::LB | LSUSubtype::LH | LSUSubtype::LW | LSUSubtype::LDP => {
            regs[dst] = storage
                .read_uint(address, width)
                .map_err(|_| ExecError::OutOfBounds { address, width })? as i32;
        }
        LSUSubtype::SB | LSUSubtype::SH | LSUSubtype::SW => {
            let value = regs[parts.op1 as usize] as u32;
            storage
                .write_uint(address, width, value)
                .map_err(|_| ExecError::OutOfBounds { address, width })?;
            // The store clears its address register; the hardware reuses
            // the dst write port for this and the trace depends on it.
            regs[dst] = 0;
        }
    }

    Ok(())
}

fn exec_fpu(regs: &mut [i32], subtype: FPUSubtype, parts: &InstructionParts) {
    let dst = parts.dst as usize;
    let a = f32::from_bits(regs[parts.op2 as usize] as u32);
    let b = f32::from_bits(regs[parts.op1 as usize] as u32);

    regs[dst] = match subtype {
        FPUSubtype::FADD => (a + b).to_bits() as i32,
        FPUSubtype::FSUB => (a - b).to_bits() as i32,
        FPUSubtype::FMUL => (a * b).to_bits() as i32,
        FPUSubtype::FMAX => (if a > b { a } else { b }).to_bits() as i32,
        FPUSubtype::FEXP2 => b.exp2().to_bits() as i32,
        FPUSubtype::FLOG2 => b.log2().to_bits() as i32,
        FPUSubtype::FRECIP => (1.0 / b).to_bits() as i32,
        FPUSubtype::FCMPLT => (a < b) as i32,
        FPUSubtype::ITOF => (regs[parts.op1 as usize] as f32).to_bits() as i32,
        FPUSubtype::FTOI => b as i32,
    };
}

fn exec_bru(regs: &mut [i32], subtype: BRUSubtype, parts: &InstructionParts) -> ThreadStep {
    match subtype {
        BRUSubtype::STOP => ThreadStep::Stop,
        BRUSubtype::SYNC => ThreadStep::Sync,
        BRUSubtype::BRZ | BRUSubtype::BRNZ => {
            let guard = regs[parts.op2 as usize];
            let taken = match subtype {
                BRUSubtype::BRZ => guard == 0,
                _ => guard != 0,
            };
            if taken {
                // displacement is relative to the next instruction
                ThreadStep::Branch((sext8(parts.op1) + 1).wrapping_mul(constants::WORD_BYTES as i32))
            } else {
                ThreadStep::Next
            }
        }
    }
}
