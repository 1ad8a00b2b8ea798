//! comm: select or reject lines common to two sorted files.
//!
//! Usage: comm [-1] [-2] [-3] [-i] FILE1 FILE2

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;
use std::process;

use comm_rs::config;
use comm_rs::pipeline::STDIN_PATH;
use comm_rs::{Column, CommCommand, CommError};

#[derive(Parser)]
#[command(name = "comm")]
#[command(version)]
#[command(about = "Compare two sorted files line by line", long_about = None)]
struct Cli {
    /// Suppress column 1 (lines only in FILE1)
    #[arg(short = '1')]
    suppress_a: bool,

    /// Suppress column 2 (lines only in FILE2)
    #[arg(short = '2')]
    suppress_b: bool,

    /// Suppress column 3 (lines in both files)
    #[arg(short = '3')]
    suppress_both: bool,

    /// Case insensitive comparison of lines
    #[arg(short = 'i')]
    ignore_case: bool,

    /// Separate columns with STR instead of a tab
    #[arg(long, value_name = "STR")]
    output_delimiter: Option<String>,

    /// Capacity of the internal line queues
    #[arg(long, default_value_t = config::DEFAULT_CHANNEL_CAPACITY)]
    channel_capacity: usize,

    /// Run on a single thread instead of the reader/merger pipeline
    #[arg(long)]
    sequential: bool,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// First sorted input (use - for stdin)
    file1: PathBuf,

    /// Second sorted input (use - for stdin)
    file2: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    if cli.file1.as_os_str() == STDIN_PATH && cli.file2.as_os_str() == STDIN_PATH {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "FILE1 and FILE2 cannot both be standard input",
            )
            .exit();
    }
    config::init_logging();

    match run(cli) {
        Ok(()) => {}
        Err(CommError::Io(ref e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("comm: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<(), CommError> {
    let mut cmd = CommCommand::new()
        .with_suppress(Column::OnlyA, cli.suppress_a)
        .with_suppress(Column::OnlyB, cli.suppress_b)
        .with_suppress(Column::Both, cli.suppress_both)
        .with_ignore_case(cli.ignore_case)
        .with_channel_capacity(cli.channel_capacity)
        .with_sequential(cli.sequential);

    if let Some(delimiter) = cli.output_delimiter {
        cmd = cmd.with_delimiter(delimiter);
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    let stats = cmd.run(&cli.file1, &cli.file2, handle)?;

    if cli.stats {
        eprintln!("comm stats: {}", stats);
    }
    Ok(())
}
