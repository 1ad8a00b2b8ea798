//! Columnar rendering of classified rows.
//!
//! Each row is laid out as `A <sep> B <sep> Both`, with suppressed or empty
//! columns left blank. The trailing run of separators is trimmed, and rows
//! that render to nothing are skipped.

use crate::config::DEFAULT_OUTPUT_BUFFER;
use crate::merge::{Column, Row};
use std::io::{self, BufWriter, Write};

/// Default column separator.
pub const DEFAULT_DELIMITER: &[u8] = b"\t";

/// Which columns are left out of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Suppress {
    pub only_a: bool,
    pub only_b: bool,
    pub both: bool,
}

impl Suppress {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: Column, suppressed: bool) -> Self {
        match column {
            Column::OnlyA => self.only_a = suppressed,
            Column::OnlyB => self.only_b = suppressed,
            Column::Both => self.both = suppressed,
        }
        self
    }

    #[inline]
    pub fn contains(&self, column: Column) -> bool {
        match column {
            Column::OnlyA => self.only_a,
            Column::OnlyB => self.only_b,
            Column::Both => self.both,
        }
    }
}

/// Render `row` into `out` (cleared first).
///
/// Returns false if the rendered line is empty and should not be printed.
pub fn render_row(row: &Row, suppress: Suppress, delimiter: &[u8], out: &mut Vec<u8>) -> bool {
    out.clear();
    for (i, column) in Column::ALL.into_iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(delimiter);
        }
        if suppress.contains(column) {
            continue;
        }
        if let Some(text) = row.get(column) {
            out.extend_from_slice(text);
        }
    }
    trim_trailing(out, delimiter);
    !out.is_empty()
}

/// Drop any trailing run of `delimiter`.
#[inline]
fn trim_trailing(out: &mut Vec<u8>, delimiter: &[u8]) {
    if delimiter.is_empty() {
        return;
    }
    while out.ends_with(delimiter) {
        out.truncate(out.len() - delimiter.len());
    }
}

/// Buffered writer for report lines.
pub struct RowWriter<W: Write> {
    writer: BufWriter<W>,
    suppress: Suppress,
    delimiter: Vec<u8>,
    scratch: Vec<u8>,
    rows_written: usize,
}

impl<W: Write> RowWriter<W> {
    /// Create a tab-separated writer with the default buffer.
    pub fn new(output: W, suppress: Suppress) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output, suppress)
    }

    /// Create a writer with a specified buffer size.
    pub fn with_capacity(capacity: usize, output: W, suppress: Suppress) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            suppress,
            delimiter: DEFAULT_DELIMITER.to_vec(),
            scratch: Vec::with_capacity(256),
            rows_written: 0,
        }
    }

    /// Use a different column separator.
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Write one row. Returns whether anything was printed.
    #[inline]
    pub fn write_row(&mut self, row: &Row) -> io::Result<bool> {
        if !render_row(row, self.suppress, &self.delimiter, &mut self.scratch) {
            return Ok(false);
        }
        self.writer.write_all(&self.scratch)?;
        self.writer.write_all(b"\n")?;
        self.rows_written += 1;
        Ok(true)
    }

    /// Number of lines printed so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
