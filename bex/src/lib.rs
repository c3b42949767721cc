//! Execution front end for the [bgpu](../bgpu/index.html) device model:
//! loads a kernel image (or assembles one with [basm](../basm/index.html)),
//! runs a dispatch and collects the register trace, which
//! [`write_trace`](fn.write_trace.html) renders as the JSON file the
//! hardware comparison tooling consumes.

use bgpu::constants::WORD_BYTES;
use bgpu::{BlockTrace, ComputeUnit, DispatchParams, Memory, MemoryTraceSink, Storage};
use log::info;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::io::Write;

#[derive(Debug)]
pub enum Error {
    Asm(basm::Error),
    Exec(bgpu::ExecError),
    /// The kernel image is not a whole number of instruction words, or
    /// does not fit the configured memory.
    InvalidProgram(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Asm(err) => write!(f, "{}", err),
            Error::Exec(err) => write!(f, "{}", err),
            Error::InvalidProgram(len) => {
                write!(f, "invalid program image of {} bytes", len)
            }
        }
    }
}

impl StdError for Error {}

impl From<basm::Error> for Error {
    fn from(err: basm::Error) -> Error {
        Error::Asm(err)
    }
}

impl From<bgpu::ExecError> for Error {
    fn from(err: bgpu::ExecError) -> Error {
        Error::Exec(err)
    }
}

/// How to run a kernel: device shape plus dispatch arguments. The program
/// image is always placed at address 0 and entered there.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    pub memory_size: u32,
    pub warp_width: usize,
    pub tb_size: u32,
    pub n_blocks: u32,
    pub dp_addr: u32,
    pub tgroup_id: u32,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            memory_size: 1024,
            warp_width: 4,
            tb_size: 4,
            n_blocks: 1,
            dp_addr: 0,
            tgroup_id: 0,
        }
    }
}

/// Everything a finished dispatch leaves behind.
#[derive(Debug)]
pub struct RunOutput {
    /// Register trace per dispatched block.
    pub traces: BTreeMap<u32, BlockTrace>,
    /// Device memory after the last block.
    pub memory: Memory,
    /// The compute unit, with the register state of the last block.
    pub compute_unit: ComputeUnit,
}

/// Runs a packed instruction stream, seeding memory through `setup` after
/// the image is placed (the way a driver fills data buffers before a
/// dispatch).
pub fn run_binary_with<F>(program: &[u8], config: &RunConfig, setup: F) -> Result<RunOutput, Error>
where
    F: FnOnce(&mut Memory),
{
    if program.is_empty()
        || program.len() % WORD_BYTES as usize != 0
        || program.len() > config.memory_size as usize
    {
        return Err(Error::InvalidProgram(program.len()));
    }

    let mut memory = Memory::new(config.memory_size);
    memory
        .write_bytes(0, program)
        .map_err(|_| Error::InvalidProgram(program.len()))?;
    setup(&mut memory);

    let mut cu = ComputeUnit::new(config.warp_width);
    let mut sink = MemoryTraceSink::new();
    info!(
        "running {} words over {} blocks",
        program.len() / WORD_BYTES as usize,
        config.n_blocks
    );
    cu.dispatch(
        DispatchParams {
            pc: 0,
            dp_addr: config.dp_addr,
            tb_size: config.tb_size,
            n_blocks: config.n_blocks,
            tgroup_id: config.tgroup_id,
        },
        &mut memory,
        &mut sink,
    )?;

    Ok(RunOutput {
        traces: sink.blocks().clone(),
        memory,
        compute_unit: cu,
    })
}

pub fn run_binary(program: &[u8], config: &RunConfig) -> Result<RunOutput, Error> {
    run_binary_with(program, config, |_| {})
}

/// Assembles `source` and runs it.
pub fn run_asm(source: &str, config: &RunConfig) -> Result<RunOutput, Error> {
    let (program, _) = basm::assemble(source)?;
    run_binary(&program, config)
}

/// Assembles `source` and runs it with a memory seeding step.
pub fn run_asm_with<F>(source: &str, config: &RunConfig, setup: F) -> Result<RunOutput, Error>
where
    F: FnOnce(&mut Memory),
{
    let (program, _) = basm::assemble(source)?;
    run_binary_with(&program, config, setup)
}

/// Writes the register trace file: a JSON object keyed by block index,
/// mapping thread index → register index → `[timestamp, value]` pairs.
pub fn write_trace<W: Write>(
    writer: W,
    traces: &BTreeMap<u32, BlockTrace>,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, traces)
}
