//! Per-stream buffering in front of the remote sink.

use crate::{error::SimResult, remote::RemoteSink, types::SheetRow};

/// Default number of pending rows that triggers a flush.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 5;

/// Accumulates rows for one output stream and bulk-appends them.
///
/// Rows are only guaranteed to reach the sink if `flush` runs on every
/// exit path; the driver's drain step is responsible for that.
#[derive(Debug)]
pub struct BufferedSinkWriter {
    stream:    &'static str,
    range:     String,
    threshold: usize,
    pending:   Vec<SheetRow>,
    flushes:   usize,
}

impl BufferedSinkWriter {
    pub fn new(stream: &'static str, range: impl Into<String>, threshold: usize) -> Self {
        Self {
            stream,
            range: range.into(),
            threshold: threshold.max(1),
            pending: Vec::new(),
            flushes: 0,
        }
    }

    /// Queue one row; flush immediately once the threshold is reached.
    pub fn add(&mut self, row: SheetRow, sink: &mut dyn RemoteSink) -> SimResult<()> {
        self.pending.push(row);
        if self.pending.len() >= self.threshold {
            self.flush(sink)?;
        }
        Ok(())
    }

    /// One bulk append with every pending row. No-op when nothing is pending.
    ///
    /// Pending rows are taken out before the call, so a failed append
    /// loses them rather than retrying.
    pub fn flush(&mut self, sink: &mut dyn RemoteSink) -> SimResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let rows = std::mem::take(&mut self.pending);
        log::debug!("flush {} -> {}: {} rows", self.stream, self.range, rows.len());
        sink.append(&self.range, &rows)?;
        self.flushes += 1;
        Ok(())
    }

    pub fn stream(&self) -> &'static str {
        self.stream
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    pub fn pending(&self) -> &[SheetRow] {
        &self.pending
    }

    /// Successful flushes so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}
