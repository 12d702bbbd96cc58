use super::RemoteSink;
use crate::{error::SimResult, types::SheetRow};
use std::collections::HashMap;

/// In-process sink. Keeps every range in memory and records each
/// `append` call so callers can check how often the sink was hit.
#[derive(Debug, Default)]
pub struct MemorySink {
    ranges:       HashMap<String, Vec<SheetRow>>,
    append_calls: Vec<(String, usize)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(range, row count)` for every append call, in call order.
    pub fn append_calls(&self) -> &[(String, usize)] {
        &self.append_calls
    }

    /// Number of append calls made against `range`.
    pub fn append_count(&self, range: &str) -> usize {
        self.append_calls.iter().filter(|(r, _)| r == range).count()
    }

    pub fn rows(&self, range: &str) -> &[SheetRow] {
        self.ranges.get(range).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RemoteSink for MemorySink {
    fn read_all(&self, range: &str) -> SimResult<Vec<SheetRow>> {
        Ok(self.rows(range).to_vec())
    }

    fn append(&mut self, range: &str, rows: &[SheetRow]) -> SimResult<()> {
        self.ranges
            .entry(range.to_string())
            .or_default()
            .extend_from_slice(rows);
        self.append_calls.push((range.to_string(), rows.len()));
        Ok(())
    }

    fn write_all(&mut self, range: &str, rows: &[SheetRow]) -> SimResult<()> {
        self.ranges.insert(range.to_string(), rows.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> SheetRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn append_preserves_prior_content() {
        let mut sink = MemorySink::new();
        sink.write_all("Sales", &[row(&["Sale_ID"]), row(&["S0001"])]).unwrap();
        sink.append("Sales", &[row(&["S0002"])]).unwrap();
        assert_eq!(sink.read_all("Sales").unwrap().len(), 3);
        assert_eq!(sink.append_count("Sales"), 1);
        assert_eq!(sink.append_count("Store_Master"), 0);
    }

    #[test]
    fn header_only_range_is_empty() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty("Sales").unwrap());
        sink.write_all("Sales", &[row(&["Sale_ID"])]).unwrap();
        assert!(sink.is_empty("Sales").unwrap());
        sink.append("Sales", &[row(&["S0001"])]).unwrap();
        assert!(!sink.is_empty("Sales").unwrap());
    }
}
