//! Remote sink: the append-only tabular mirror consumed downstream.
//!
//! A sink is addressed by named ranges (worksheets). The simulator only
//! ever reads a whole range, appends rows to it, or (during one-time
//! seeding of an empty range) writes its initial content.

mod jsonl;
mod memory;

pub use jsonl::JsonlSink;
pub use memory::MemorySink;

use crate::{error::SimResult, types::SheetRow};

pub trait RemoteSink {
    /// Every row of `range`, header included, in order.
    fn read_all(&self, range: &str) -> SimResult<Vec<SheetRow>>;

    /// Add `rows` after the existing content of `range`.
    fn append(&mut self, range: &str, rows: &[SheetRow]) -> SimResult<()>;

    /// Replace the content of `range`. Used only to seed an empty range.
    fn write_all(&mut self, range: &str, rows: &[SheetRow]) -> SimResult<()>;

    /// A range holding at most a header row counts as empty.
    fn is_empty(&self, range: &str) -> SimResult<bool> {
        Ok(self.read_all(range)?.len() <= 1)
    }
}
