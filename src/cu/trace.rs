use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered `(timestamp, value)` writes observed for one register.
pub type RegisterHistory = Vec<(u64, i32)>;

/// Register writes of one dispatched thread block:
/// thread index → register index → history.
///
/// Serializes to the layout the hardware comparison tooling expects, with
/// map keys as strings and history entries as `[timestamp, value]` pairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BlockTrace {
    threads: BTreeMap<u32, BTreeMap<u8, RegisterHistory>>,
}

impl BlockTrace {
    pub fn record(&mut self, thread: u32, register: u8, timestamp: u64, value: i32) {
        self.threads
            .entry(thread)
            .or_insert_with(BTreeMap::new)
            .entry(register)
            .or_insert_with(Vec::new)
            .push((timestamp, value));
    }

    pub fn history(&self, thread: u32, register: u8) -> Option<&RegisterHistory> {
        self.threads.get(&thread)?.get(&register)
    }

    /// Total number of recorded writes for `thread`, across all registers.
    pub fn step_count(&self, thread: u32) -> usize {
        self.threads
            .get(&thread)
            .map(|regs| regs.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.threads.values().all(|regs| regs.is_empty())
    }
}

/// Consumer of the per-step register writes a dispatch produces.
///
/// The compute unit reports every completed step here; the JSON trace file
/// writer and the in-memory sink used by tests are both implementations.
pub trait TraceSink {
    /// A new thread block starts executing.
    fn begin_block(&mut self, tb_id: u32);

    /// Thread `thread` finished a step at `timestamp`, leaving `value` in
    /// register `register`.
    fn record(&mut self, thread: u32, register: u8, timestamp: u64, value: i32);
}

/// `TraceSink` that keeps every block's trace in memory, keyed by block id.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MemoryTraceSink {
    blocks: BTreeMap<u32, BlockTrace>,
    #[serde(skip)]
    current: u32,
}

impl MemoryTraceSink {
    pub fn new() -> MemoryTraceSink {
        MemoryTraceSink::default()
    }

    pub fn blocks(&self) -> &BTreeMap<u32, BlockTrace> {
        &self.blocks
    }

    pub fn block(&self, tb_id: u32) -> Option<&BlockTrace> {
        self.blocks.get(&tb_id)
    }
}

impl TraceSink for MemoryTraceSink {
    fn begin_block(&mut self, tb_id: u32) {
        self.current = tb_id;
        self.blocks.insert(tb_id, BlockTrace::default());
    }

    fn record(&mut self, thread: u32, register: u8, timestamp: u64, value: i32) {
        if let Some(block) = self.blocks.get_mut(&self.current) {
            block.record(thread, register, timestamp, value);
        }
    }
}
