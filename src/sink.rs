use std::io::Write;

use anyhow::Result;

use crate::parser::PageRecord;

/// Streams page records to the indexing side as JSON Lines.
pub struct RecordWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W) -> Self {
        RecordWriter { out, written: 0 }
    }

    pub fn write(&mut self, record: &PageRecord) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flush the sink and return how many records went out.
    pub fn finish(mut self) -> Result<usize> {
        self.out.flush()?;
        Ok(self.written)
    }
}
