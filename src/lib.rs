//! comm-rs: compare two sorted files line by line.
//!
//! Each line is classified as unique to the first input, unique to the
//! second, or common to both, and reported in three columns.
//!
//! # Features
//!
//! - **Streaming**: one pending line per input, never a whole file in memory
//! - **Concurrent**: line sources and the classifier run on their own threads
//! - **Deterministic**: output order depends only on inputs and compare mode
//!
//! # Example
//!
//! ```rust,no_run
//! use comm_rs::{CommCommand, Column};
//!
//! let cmd = CommCommand::new()
//!     .with_suppress(Column::Both, true)
//!     .with_ignore_case(true);
//! let stats = cmd.run("a.txt", "b.txt", std::io::stdout().lock()).unwrap();
//! eprintln!("{}", stats);
//! ```

pub mod compare;
pub mod config;
pub mod line;
pub mod merge;
pub mod output;
pub mod pipeline;

// Re-export commonly used types
pub use compare::CompareMode;
pub use line::{CommError, Line, LineReader, Result, SourceSummary};
pub use merge::{classify, Classifier, Column, Row};
pub use output::{render_row, RowWriter, Suppress};
pub use pipeline::{open_input, CommCommand, CommStats};
