//! Line sources: turn a byte stream into an ordered sequence of lines.

use crate::config::{DEFAULT_INPUT_BUFFER, DEFAULT_LINE_BUFFER};
use crossbeam_channel::{bounded, Receiver};
use memchr::memchr;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// A single input line with its trailing `\r`/`\n` run removed.
///
/// Lines are raw bytes; ordinal comparison is byte order, which matches
/// codepoint order for UTF-8 text.
pub type Line = Vec<u8>;

/// Errors surfaced at the edges of a comparison run.
#[derive(Error, Debug)]
pub enum CommError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("pipeline failure: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, CommError>;

/// Streaming line reader.
///
/// Yields every line in physical order, including a final line that lacks a
/// newline terminator. A read error other than `Interrupted` ends the
/// sequence without yielding the partially read line; the error is logged
/// and recorded in [`LineReader::summary`].
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    label: String,
    lines_read: usize,
    finished: bool,
    failed: bool,
}

impl<R: Read> LineReader<R> {
    /// Create a line reader over any readable source.
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self::with_capacity(reader, label, DEFAULT_INPUT_BUFFER)
    }

    /// Create a line reader with a custom buffer capacity.
    pub fn with_capacity(reader: R, label: impl Into<String>, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            label: label.into(),
            lines_read: 0,
            finished: false,
            failed: false,
        }
    }

    /// Name used in diagnostics (usually the file path).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Read the next line, or `None` once the stream is exhausted.
    pub fn read_line(&mut self) -> Option<Line> {
        if self.finished {
            return None;
        }

        let mut buf = Vec::with_capacity(DEFAULT_LINE_BUFFER);
        match self.read_segment(&mut buf) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                trim_line_ending(&mut buf);
                self.lines_read += 1;
                Some(buf)
            }
            Err(e) => {
                tracing::warn!(
                    source = %self.label,
                    line = self.lines_read + 1,
                    error = %e,
                    "read failed, treating as end of input"
                );
                self.finished = true;
                self.failed = true;
                None
            }
        }
    }

    /// Append bytes up to and including the next `\n` (or end of data).
    fn read_segment(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let mut total = 0;
        loop {
            let (done, used) = {
                let available = match self.reader.fill_buf() {
                    Ok(bytes) => bytes,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                match memchr(b'\n', available) {
                    Some(pos) => {
                        buf.extend_from_slice(&available[..=pos]);
                        (true, pos + 1)
                    }
                    None => {
                        buf.extend_from_slice(available);
                        (available.is_empty(), available.len())
                    }
                }
            };
            self.reader.consume(used);
            total += used;
            if done {
                return Ok(total);
            }
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        self.read_line()
    }
}

/// What a line source did by the time it finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceSummary {
    /// Lines read
    pub lines: usize,
    /// Stopped on a read error rather than end of data
    pub failed: bool,
}

impl<R: Read> LineReader<R> {
    /// Lines read so far and whether a read error ended the sequence.
    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            lines: self.lines_read,
            failed: self.failed,
        }
    }
}

impl<R: Read + Send + 'static> LineReader<R> {
    /// Run this reader on its own thread, publishing lines onto a bounded queue.
    ///
    /// The queue is closed after the last line. If the consumer hangs up
    /// first, the thread stops reading.
    pub fn spawn(
        mut self,
        name: &str,
        capacity: usize,
    ) -> Result<(Receiver<Line>, JoinHandle<SourceSummary>)> {
        let (tx, rx) = bounded(capacity);
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                while let Some(line) = self.read_line() {
                    if tx.send(line).is_err() {
                        tracing::debug!(source = %self.label, "consumer hung up");
                        break;
                    }
                }
                self.summary()
            })?;
        Ok((rx, handle))
    }
}

/// Strip any trailing run of `\r` and `\n` bytes.
#[inline]
pub fn trim_line_ending(line: &mut Vec<u8>) {
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
}
