//! Buffered line output for streaming commands.

use crate::error::Result;
use std::io::{BufWriter, Write};

/// Buffer size for LineWriter (8MB default).
const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Large-buffer writer for newline-terminated text records.
pub struct LineWriter<W: Write> {
    writer: BufWriter<W>,
    lines: usize,
}

impl<W: Write> LineWriter<W> {
    /// Create a new LineWriter with default 8MB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            lines: 0,
        }
    }

    /// Write a full line as-is with newline.
    #[inline]
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Write `key<TAB>value` followed by newline.
    pub fn write_pair(&mut self, key: &str, value: impl std::fmt::Display) -> Result<()> {
        writeln!(self.writer, "{}\t{}", key, value)?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
