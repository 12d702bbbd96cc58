use super::RemoteSink;
use crate::{error::SimResult, types::SheetRow};
use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

/// Directory-backed sink: one append-only `<range>.jsonl` file per
/// worksheet, one JSON array of strings per line.
pub struct JsonlSink {
    dir: PathBuf,
}

impl JsonlSink {
    /// Open (or create) the sink directory.
    pub fn open(dir: impl AsRef<Path>) -> SimResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn range_path(&self, range: &str) -> PathBuf {
        self.dir.join(format!("{range}.jsonl"))
    }

    fn write_rows(file: File, rows: &[SheetRow]) -> SimResult<()> {
        let mut out = BufWriter::new(file);
        for row in rows {
            serde_json::to_writer(&mut out, row)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl RemoteSink for JsonlSink {
    fn read_all(&self, range: &str) -> SimResult<Vec<SheetRow>> {
        let file = match File::open(self.range_path(range)) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut rows = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(serde_json::from_str(&line)?);
        }
        Ok(rows)
    }

    fn append(&mut self, range: &str, rows: &[SheetRow]) -> SimResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.range_path(range))?;
        Self::write_rows(file, rows)
    }

    fn write_all(&mut self, range: &str, rows: &[SheetRow]) -> SimResult<()> {
        Self::write_rows(File::create(self.range_path(range))?, rows)
    }
}
