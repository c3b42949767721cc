//! Software model of the BGPU compute device.
//!
//! The crate is split into the pure ISA model ([`isa`](isa/index.html) and
//! [`constants`](constants/index.html)), the device memory
//! ([`memory`](memory/index.html)), the compute unit emulator
//! ([`cu`](cu/index.html)) and the host-visible device front
//! ([`device`](device/index.html)). The assembler lives in the separate
//! `basm` crate and produces the instruction stream this crate executes.

pub mod constants;
pub mod cu;
pub mod device;
pub mod isa;
pub mod memory;

pub use cu::{BlockTrace, ComputeUnit, DispatchParams, ExecError, MemoryTraceSink, TraceSink};
pub use device::{Buffer, Device, DeviceError, ThreadEngine};
pub use isa::*;
pub use memory::{Memory, Storage};

/// A packed 32-bit instruction word.
pub type Word = u32;

/// Byte order of instruction words and all memory accesses.
pub type Endian = byteorder::LittleEndian;
