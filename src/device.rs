use crate::constants;
use crate::cu::{BlockTrace, ComputeUnit, DispatchParams, ExecError, MemoryTraceSink, TraceSink};
use crate::memory::{Memory, Storage};
use log::{debug, info};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

/// A device buffer handle handed out by [`Device::alloc`](struct.Device.html#method.alloc).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Buffer {
    pub base: u32,
    pub size: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeviceError {
    /// The allocator ran out of device memory.
    OutOfMemory { requested: u32, available: u32 },
    /// A host copy did not fit the target buffer or memory range.
    CopyOutOfRange,
    /// A memory-mapped access hit neither RAM nor a thread-engine register.
    InvalidAccess { address: u32 },
    Exec(ExecError),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DeviceError::OutOfMemory { requested, available } => write!(
                f,
                "allocation of {} bytes exceeds the {} bytes left",
                requested, available
            ),
            DeviceError::CopyOutOfRange => f.write_str("copy exceeds buffer bounds"),
            DeviceError::InvalidAccess { address } => {
                write!(f, "invalid device access at {:#010x}", address)
            }
            DeviceError::Exec(ref err) => write!(f, "{}", err),
        }
    }
}

impl StdError for DeviceError {}

impl From<ExecError> for DeviceError {
    fn from(err: ExecError) -> DeviceError {
        DeviceError::Exec(err)
    }
}

/// The memory-mapped thread-engine register block at
/// [`TE_BASE`](../constants/constant.TE_BASE.html).
///
/// Offsets 0..16 latch the dispatch arguments; writing the go register at
/// offset 20 starts a dispatch, reading it back reports status: bit 2 set
/// once finished, bits 7:4 the dispatched block count, bits 27:24 the
/// finished block count.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadEngine {
    pc: u32,
    dp_addr: u32,
    tblocks: u32,
    tgroup_id: u32,
    tb_size: u32,
    status: u32,
}

const TE_PC: u32 = 0;
const TE_DP_ADDR: u32 = 4;
const TE_TBLOCKS: u32 = 8;
const TE_TGROUP_ID: u32 = 12;
const TE_TB_SIZE: u32 = 16;
const TE_GO: u32 = 20;

impl ThreadEngine {
    pub fn new() -> ThreadEngine {
        ThreadEngine::default()
    }

    fn contains(address: u32) -> bool {
        address >= constants::TE_BASE
            && address < constants::TE_BASE + constants::TE_REGISTER_COUNT * constants::WORD_BYTES
    }

    /// The dispatch arguments currently latched in the registers.
    pub fn params(&self) -> DispatchParams {
        DispatchParams {
            pc: self.pc,
            dp_addr: self.dp_addr,
            tb_size: self.tb_size,
            n_blocks: self.tblocks,
            tgroup_id: self.tgroup_id,
        }
    }

    fn read(&self, offset: u32) -> u32 {
        match offset {
            TE_PC => self.pc,
            TE_DP_ADDR => self.dp_addr,
            TE_TBLOCKS => self.tblocks,
            TE_TGROUP_ID => self.tgroup_id,
            TE_TB_SIZE => self.tb_size,
            TE_GO => self.status,
            _ => unreachable!(),
        }
    }

    fn write(
        &mut self,
        offset: u32,
        value: u32,
        cu: &mut ComputeUnit,
        memory: &mut dyn Storage,
        sink: &mut dyn TraceSink,
    ) -> Result<(), ExecError> {
        match offset {
            TE_PC => self.pc = value,
            TE_DP_ADDR => self.dp_addr = value,
            TE_TBLOCKS => self.tblocks = value,
            TE_TGROUP_ID => self.tgroup_id = value,
            TE_TB_SIZE => self.tb_size = value,
            TE_GO => {
                let params = self.params();
                info!(
                    "thread engine go: pc={:#010x} blocks={}",
                    params.pc, params.n_blocks
                );
                cu.dispatch(params, memory, sink)?;
                self.status = (1 << 2)
                    | ((self.tblocks & 0xF) << 4)
                    | ((self.tblocks & 0xF) << 24);
            }
            _ => unreachable!(),
        }
        Ok(())
    }
}

/// Host-visible device front: flat memory, a bump allocator for kernel and
/// data buffers, the compute unit and the thread-engine registers.
pub struct Device {
    memory: Memory,
    cu: ComputeUnit,
    engine: ThreadEngine,
    next_alloc: u32,
}

impl Device {
    pub fn new(memory_size: u32, warp_width: usize) -> Device {
        Device {
            memory: Memory::new(memory_size),
            cu: ComputeUnit::new(warp_width),
            engine: ThreadEngine::new(),
            next_alloc: 0,
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn compute_unit(&self) -> &ComputeUnit {
        &self.cu
    }

    /// Reserves a zeroed, word-aligned buffer.
    pub fn alloc(&mut self, size: u32) -> Result<Buffer, DeviceError> {
        let base = self.next_alloc;
        let aligned = size
            .checked_add(constants::WORD_BYTES - 1)
            .map(|s| s & !(constants::WORD_BYTES - 1))
            .unwrap_or(u32::max_value());
        let available = self.memory.length() - base;
        if aligned > available {
            return Err(DeviceError::OutOfMemory {
                requested: size,
                available,
            });
        }
        self.next_alloc = base + aligned;
        debug!("alloc {} bytes at {:#010x}", size, base);
        Ok(Buffer { base, size })
    }

    /// Copies host bytes into a device buffer.
    pub fn copy_h2d(&mut self, dest: &Buffer, src: &[u8]) -> Result<(), DeviceError> {
        if src.len() as u32 > dest.size {
            return Err(DeviceError::CopyOutOfRange);
        }
        self.memory
            .write_bytes(dest.base, src)
            .map_err(|_| DeviceError::CopyOutOfRange)
    }

    /// Copies a device buffer back into host memory.
    pub fn copy_d2h(&self, dest: &mut [u8], src: &Buffer) -> Result<(), DeviceError> {
        if dest.len() as u32 > src.size {
            return Err(DeviceError::CopyOutOfRange);
        }
        let slice = self
            .memory
            .borrow_slice(src.base, dest.len() as u32)
            .map_err(|_| DeviceError::CopyOutOfRange)?;
        dest.copy_from_slice(slice);
        Ok(())
    }

    /// Lays out kernel arguments as packed 4-byte little-endian slots at
    /// the start of `buffer`, forming the parameter block `ldparam` reads.
    pub fn write_params(&mut self, buffer: &Buffer, args: &[u32]) -> Result<(), DeviceError> {
        if (args.len() as u32) * constants::WORD_BYTES > buffer.size {
            return Err(DeviceError::CopyOutOfRange);
        }
        self.memory
            .write_words(buffer.base, args)
            .map_err(|_| DeviceError::CopyOutOfRange)
    }

    /// Enqueues and runs a kernel, returning the per-block register traces.
    pub fn dispatch(
        &mut self,
        params: DispatchParams,
    ) -> Result<BTreeMap<u32, BlockTrace>, DeviceError> {
        let mut sink = MemoryTraceSink::new();
        self.cu.dispatch(params, &mut self.memory, &mut sink)?;
        Ok(sink.blocks().clone())
    }

    /// Word read as a debug transport sees it: RAM or a thread-engine
    /// register.
    pub fn read_word(&self, address: u32) -> Result<u32, DeviceError> {
        if address % constants::WORD_BYTES != 0 {
            return Err(DeviceError::InvalidAccess { address });
        }
        if ThreadEngine::contains(address) {
            return Ok(self.engine.read(address - constants::TE_BASE));
        }
        self.memory
            .read_word(address)
            .map_err(|_| DeviceError::InvalidAccess { address })
    }

    /// Word write as a debug transport sees it. Writing the thread-engine
    /// go register runs the latched dispatch to completion; traces of a
    /// dispatch started this way are discarded.
    pub fn write_word(&mut self, address: u32, value: u32) -> Result<(), DeviceError> {
        if address % constants::WORD_BYTES != 0 {
            return Err(DeviceError::InvalidAccess { address });
        }
        if ThreadEngine::contains(address) {
            let mut sink = MemoryTraceSink::new();
            self.engine.write(
                address - constants::TE_BASE,
                value,
                &mut self.cu,
                &mut self.memory,
                &mut sink,
            )?;
            return Ok(());
        }
        self.memory
            .write_word(address, value)
            .map_err(|_| DeviceError::InvalidAccess { address })
    }
}
