mod logic;
mod trace;

pub use self::trace::{BlockTrace, MemoryTraceSink, RegisterHistory, TraceSink};

use self::logic::{ThreadContext, ThreadStep};
use crate::constants;
use crate::isa::decode_parts;
use crate::memory::Storage;
use crate::Word;
use log::{debug, trace};
use std::error::Error as StdError;
use std::fmt;

/// Errors that abort the current dispatch. Traces emitted for earlier
/// blocks stay valid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecError {
    /// A data or instruction access fell outside device memory.
    OutOfBounds { address: u32, width: u32 },
    /// A data access was not aligned to its width.
    UnalignedAccess { address: u32, width: u32 },
    /// The subtype bits do not decode for the addressed execution unit.
    InvalidOpcode(Word),
    /// Dispatch precondition `0 < tb_size <= warp_width` violated.
    BadBlockSize { tb_size: u32, warp_width: u32 },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ExecError::OutOfBounds { address, width } => {
                write!(f, "{}-byte access at {:#010x} is out of bounds", width, address)
            }
            ExecError::UnalignedAccess { address, width } => {
                write!(f, "{}-byte access at {:#010x} is unaligned", width, address)
            }
            ExecError::InvalidOpcode(word) => {
                write!(f, "unknown opcode in instruction {:#010x}", word)
            }
            ExecError::BadBlockSize { tb_size, warp_width } => write!(
                f,
                "thread block size {} not in 1..={}",
                tb_size, warp_width
            ),
        }
    }
}

impl StdError for ExecError {}

/// Arguments of one kernel dispatch, as written into the thread-engine
/// registers by the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DispatchParams {
    /// Address of the first instruction.
    pub pc: u32,
    /// Address of the parameter block.
    pub dp_addr: u32,
    /// Active threads per block.
    pub tb_size: u32,
    /// Number of thread blocks to run.
    pub n_blocks: u32,
    /// Thread group id, recorded but not observable from kernels.
    pub tgroup_id: u32,
}

/// The compute unit: a warp of lockstep threads, each with a private
/// program counter and register file, sharing the device memory.
///
/// Threads advance round-robin, one instruction per thread per round, so
/// the produced register trace is a pure function of the dispatch inputs.
#[derive(Debug)]
pub struct ComputeUnit {
    warp_width: usize,
    pc: Vec<u32>,
    stopped: Vec<bool>,
    syncing: Vec<bool>,
    // thread-major register block, indexed tidx * REGISTER_COUNT + r
    regs: Vec<i32>,
    tb_id: u32,
    dp_addr: u32,
    tb_size: usize,
    tgroup_id: u32,
    timestamp: u64,
}

impl ComputeUnit {
    pub fn new(warp_width: usize) -> ComputeUnit {
        ComputeUnit {
            warp_width,
            pc: vec![0; warp_width],
            stopped: vec![false; warp_width],
            syncing: vec![false; warp_width],
            regs: vec![0; warp_width * constants::REGISTER_COUNT],
            tb_id: 0,
            dp_addr: 0,
            tb_size: warp_width,
            tgroup_id: 0,
            timestamp: 1,
        }
    }

    pub fn warp_width(&self) -> usize {
        self.warp_width
    }

    /// Thread group id of the last dispatch.
    pub fn tgroup_id(&self) -> u32 {
        self.tgroup_id
    }

    /// Register `r` of thread `tidx`, as left behind by the last block.
    pub fn reg(&self, tidx: usize, r: usize) -> i32 {
        self.regs[tidx * constants::REGISTER_COUNT + r]
    }

    /// The full register file of thread `tidx`.
    pub fn registers(&self, tidx: usize) -> &[i32] {
        let start = tidx * constants::REGISTER_COUNT;
        &self.regs[start..start + constants::REGISTER_COUNT]
    }

    /// Runs `params.n_blocks` thread blocks sequentially against `storage`,
    /// reporting every completed step to `sink`. Register files are reset
    /// per block; memory carries over.
    pub fn dispatch(
        &mut self,
        params: DispatchParams,
        storage: &mut dyn Storage,
        sink: &mut dyn TraceSink,
    ) -> Result<(), ExecError> {
        if params.tb_size == 0 || params.tb_size as usize > self.warp_width {
            return Err(ExecError::BadBlockSize {
                tb_size: params.tb_size,
                warp_width: self.warp_width as u32,
            });
        }

        debug!(
            "dispatch: pc={:#010x} dp_addr={:#010x} tb_size={} blocks={} tgroup={}",
            params.pc, params.dp_addr, params.tb_size, params.n_blocks, params.tgroup_id
        );

        for tb in 0..params.n_blocks {
            for i in 0..self.warp_width {
                self.pc[i] = params.pc;
                self.stopped[i] = false;
                self.syncing[i] = false;
            }
            for reg in self.regs.iter_mut() {
                *reg = 0;
            }
            self.tb_id = tb;
            self.dp_addr = params.dp_addr;
            self.tb_size = params.tb_size as usize;
            self.tgroup_id = params.tgroup_id;
            self.timestamp = 1;

            sink.begin_block(tb);
            self.execute(storage, sink)?;
            debug!("block {} finished", tb);
        }

        Ok(())
    }

    /// Runs the current block until every active thread has stopped.
    ///
    /// A thread waiting at a barrier keeps re-executing the barrier
    /// instruction (its pc does not move), so the release condition is
    /// re-evaluated every round.
    fn execute(
        &mut self,
        storage: &mut dyn Storage,
        sink: &mut dyn TraceSink,
    ) -> Result<(), ExecError> {
        loop {
            for tidx in 0..self.tb_size {
                if self.stopped[tidx] {
                    continue;
                }
                self.step_thread(tidx, storage, sink)?;
            }

            if (0..self.tb_size).all(|i| self.stopped[i]) {
                return Ok(());
            }
        }
    }

    fn step_thread(
        &mut self,
        tidx: usize,
        storage: &mut dyn Storage,
        sink: &mut dyn TraceSink,
    ) -> Result<(), ExecError> {
        let pc = self.pc[tidx];
        let word = self.fetch(storage, pc)?;
        let parts = decode_parts(word);

        trace!(
            "t{} pc={:#010x} word={:#010x} {:?}/{:#04x}",
            tidx, pc, word, parts.eu, parts.subtype
        );

        let ctx = ThreadContext {
            tidx,
            tb_id: self.tb_id,
            dp_addr: self.dp_addr,
            warp_width: self.warp_width,
        };
        let start = tidx * constants::REGISTER_COUNT;
        let regs = &mut self.regs[start..start + constants::REGISTER_COUNT];

        match logic::step(regs, storage, &ctx, &parts)? {
            ThreadStep::Next => {
                self.pc[tidx] = pc.wrapping_add(constants::WORD_BYTES);
            }
            ThreadStep::Branch(delta) => {
                self.pc[tidx] = (pc as i64 + i64::from(delta)) as u32;
            }
            ThreadStep::Stop => {
                self.stopped[tidx] = true;
                // stop is not a traced step
                return Ok(());
            }
            ThreadStep::Sync => {
                self.syncing[tidx] = true;
                self.try_release_barrier();
                if self.syncing[tidx] {
                    // suspended at the barrier: no trace entry, no timestamp
                    return Ok(());
                }
            }
        }

        sink.record(
            tidx as u32,
            parts.dst,
            self.timestamp,
            self.regs[start + parts.dst as usize],
        );
        self.timestamp += 1;
        Ok(())
    }

    /// Releases the barrier once every non-stopped thread of the block is
    /// waiting at it. Stopped threads neither participate nor block it.
    fn try_release_barrier(&mut self) {
        let waiting = (0..self.tb_size).filter(|&i| self.syncing[i]).count();
        let stopped = (0..self.tb_size).filter(|&i| self.stopped[i]).count();
        if waiting + stopped == self.tb_size && waiting > 0 {
            debug!("barrier released, {} threads", waiting);
            for i in 0..self.tb_size {
                if self.syncing[i] {
                    self.syncing[i] = false;
                    self.pc[i] = self.pc[i].wrapping_add(constants::WORD_BYTES);
                }
            }
        }
    }

    fn fetch(&self, storage: &dyn Storage, pc: u32) -> Result<Word, ExecError> {
        storage.read_word(pc).map_err(|_| ExecError::OutOfBounds {
            address: pc,
            width: constants::WORD_BYTES,
        })
    }
}

impl Default for ComputeUnit {
    fn default() -> ComputeUnit {
        ComputeUnit::new(constants::DEFAULT_WARP_WIDTH)
    }
}
