//! Orchestration of a full comparison run.
//!
//! Two drivers share the same line sources, classifier and writer:
//!
//! - [`CommCommand::run_pipeline`]: each line source on its own thread, the
//!   classifier on a third, all joined by bounded queues. The calling thread
//!   renders rows.
//! - [`CommCommand::run_streaming`]: the same iterators pulled on one thread.
//!
//! Row order is decided by the classifier alone, so both drivers produce
//! byte-identical output for identical inputs.

use crate::compare::CompareMode;
use crate::config::{channel_capacity, DEFAULT_CHANNEL_CAPACITY, DEFAULT_OUTPUT_BUFFER};
use crate::line::{CommError, LineReader, Result, SourceSummary};
use crate::merge::{Classifier, Column, Row};
use crate::output::{RowWriter, Suppress, DEFAULT_DELIMITER};
use crossbeam_channel::bounded;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;
use std::thread::{self, JoinHandle};

/// Path operand that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// A line source over a file or standard input.
pub type InputReader = LineReader<Box<dyn Read + Send>>;

/// Open `path` as a line source, treating `-` as standard input.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<InputReader> {
    let path = path.as_ref();
    if path.as_os_str() == STDIN_PATH {
        return Ok(LineReader::new(
            Box::new(io::stdin()) as Box<dyn Read + Send>,
            "<stdin>",
        ));
    }
    let file = std::fs::File::open(path).map_err(|source| CommError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LineReader::new(
        Box::new(file) as Box<dyn Read + Send>,
        path.display().to_string(),
    ))
}

/// Comparison run configuration.
#[derive(Debug, Clone)]
pub struct CommCommand {
    /// Columns left out of the report
    pub suppress: Suppress,
    /// Line ordering
    pub mode: CompareMode,
    /// Column separator (default: tab)
    pub delimiter: Vec<u8>,
    /// Capacity of each inter-thread queue
    pub channel_capacity: usize,
    /// Use the single-threaded driver
    pub sequential: bool,
}

impl Default for CommCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommCommand {
    pub fn new() -> Self {
        Self {
            suppress: Suppress::none(),
            mode: CompareMode::Ordinal,
            delimiter: DEFAULT_DELIMITER.to_vec(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            sequential: false,
        }
    }

    /// Suppress or restore one column.
    pub fn with_suppress(mut self, column: Column, suppressed: bool) -> Self {
        self.suppress = self.suppress.with(column, suppressed);
        self
    }

    /// Compare lines case-insensitively.
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.mode = CompareMode::from_ignore_case(ignore_case);
        self
    }

    /// Set the column separator.
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the queue capacity. Zero is raised to one.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = channel_capacity(capacity);
        self
    }

    /// Select the single-threaded driver.
    pub fn with_sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    /// Compare two files (either may be `-` for stdin).
    ///
    /// Both inputs are opened before anything is written, so an unopenable
    /// file produces no partial report.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>, W: Write>(
        &self,
        path_a: P,
        path_b: Q,
        output: W,
    ) -> Result<CommStats> {
        if path_a.as_ref().as_os_str() == STDIN_PATH && path_b.as_ref().as_os_str() == STDIN_PATH
        {
            return Err(CommError::Usage(
                "only one input may be standard input".to_string(),
            ));
        }
        let a = open_input(path_a)?;
        let b = open_input(path_b)?;

        if self.sequential {
            self.run_streaming(a, b, output)
        } else {
            self.run_pipeline(a, b, output)
        }
    }

    /// Single-threaded driver: pull lines and rows on the calling thread.
    pub fn run_streaming<RA: Read, RB: Read, W: Write>(
        &self,
        mut a: LineReader<RA>,
        mut b: LineReader<RB>,
        output: W,
    ) -> Result<CommStats> {
        tracing::debug!(
            source_a = a.label(),
            source_b = b.label(),
            mode = ?self.mode,
            "sequential run"
        );
        let mut writer = self.writer(output);
        let mut stats = CommStats::default();
        self.drain(
            Classifier::new(&mut a, &mut b, self.mode),
            &mut writer,
            &mut stats,
        )?;
        stats.record_sources(a.summary(), b.summary());
        Ok(stats)
    }

    /// Threaded driver: two line source threads feed a classifier thread
    /// over bounded queues; rows are written on the calling thread.
    pub fn run_pipeline<RA, RB, W>(
        &self,
        a: LineReader<RA>,
        b: LineReader<RB>,
        output: W,
    ) -> Result<CommStats>
    where
        RA: Read + Send + 'static,
        RB: Read + Send + 'static,
        W: Write,
    {
        let capacity = channel_capacity(self.channel_capacity);
        tracing::debug!(
            source_a = a.label(),
            source_b = b.label(),
            mode = ?self.mode,
            capacity,
            "threaded run"
        );

        let (rx_a, source_a) = a.spawn("comm-source-a", capacity)?;
        let (rx_b, source_b) = b.spawn("comm-source-b", capacity)?;

        let (tx, rx) = bounded::<Row>(capacity);
        let mode = self.mode;
        let classifier = thread::Builder::new()
            .name("comm-classify".to_string())
            .spawn(move || {
                for row in Classifier::new(rx_a, rx_b, mode) {
                    if tx.send(row).is_err() {
                        break;
                    }
                }
            })?;

        let mut writer = self.writer(output);
        let mut stats = CommStats::default();
        // Dropping the receiver on a write failure unblocks every upstream thread.
        let written = self.drain(rx.into_iter(), &mut writer, &mut stats);

        join(classifier, "classifier")?;
        let summary_a = join(source_a, "line source A")?;
        let summary_b = join(source_b, "line source B")?;
        tracing::debug!(?summary_a, ?summary_b, "line sources finished");
        stats.record_sources(summary_a, summary_b);

        written?;
        Ok(stats)
    }

    fn writer<W: Write>(&self, output: W) -> RowWriter<W> {
        RowWriter::with_capacity(DEFAULT_OUTPUT_BUFFER, output, self.suppress)
            .with_delimiter(self.delimiter.clone())
    }

    /// Render every row, then flush.
    fn drain<I, W>(&self, rows: I, writer: &mut RowWriter<W>, stats: &mut CommStats) -> Result<()>
    where
        I: Iterator<Item = Row>,
        W: Write,
    {
        for row in rows {
            stats.record(row.column());
            writer.write_row(&row)?;
        }
        stats.rows_written = writer.rows_written();
        writer.flush()?;
        Ok(())
    }
}

fn join<T>(handle: JoinHandle<T>, what: &str) -> Result<T> {
    handle
        .join()
        .map_err(|_| CommError::Pipeline(format!("{} thread panicked", what)))
}

/// Counters from a comparison run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommStats {
    /// Rows classified as only in A
    pub only_a: usize,
    /// Rows classified as only in B
    pub only_b: usize,
    /// Rows classified as common
    pub both: usize,
    /// Lines actually printed
    pub rows_written: usize,
    /// Inputs that ended on a read error
    pub read_errors: usize,
}

impl CommStats {
    #[inline]
    fn record(&mut self, column: Column) {
        match column {
            Column::OnlyA => self.only_a += 1,
            Column::OnlyB => self.only_b += 1,
            Column::Both => self.both += 1,
        }
    }

    /// Lines consumed from A. Every line lands in exactly one row.
    pub fn lines_a(&self) -> usize {
        self.only_a + self.both
    }

    /// Lines consumed from B.
    pub fn lines_b(&self) -> usize {
        self.only_b + self.both
    }

    fn record_sources(&mut self, a: SourceSummary, b: SourceSummary) {
        self.read_errors = usize::from(a.failed) + usize::from(b.failed);
    }
}

impl fmt::Display for CommStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read: {}/{}, Only A: {}, Only B: {}, Both: {}, Written: {}, Read errors: {}",
            self.lines_a(),
            self.lines_b(),
            self.only_a,
            self.only_b,
            self.both,
            self.rows_written,
            self.read_errors
        )
    }
}
