//! CLI argument definitions for the PNAD Contínua reader.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pnadc",
    version,
    about = "PNAD Contínua reader - Load IBGE fixed-width microdata",
    long_about = "Load PNAD Contínua fixed-width microdata using the IBGE codebook.\n\n\
                  The codebook spreadsheet (or its CSV export) gives each variable's\n\
                  position, width and value labels."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the column layout derived from a codebook.
    Schema(SchemaArgs),

    /// Load a microdata file and preview or export it.
    Read(ReadArgs),
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Codebook spreadsheet (.xls, .xlsx, .ods) or CSV export.
    #[arg(value_name = "CODEBOOK")]
    pub codebook: PathBuf,

    /// Print the schema as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Worksheet name (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,
}

#[derive(Parser)]
pub struct ReadArgs {
    /// Fixed-width microdata file.
    #[arg(value_name = "MICRODATA")]
    pub microdata: PathBuf,

    /// Codebook spreadsheet (.xls, .xlsx, .ods) or CSV export.
    #[arg(value_name = "CODEBOOK")]
    pub codebook: PathBuf,

    /// Replace categorical codes with their labels.
    #[arg(long = "labels")]
    pub labels: bool,

    /// Only load these columns, in this order (comma-separated).
    #[arg(long = "columns", value_name = "NAMES", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Read at most this many records.
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Microdata encoding label (e.g. latin1, utf-8).
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Records gathered per chunk while reading.
    #[arg(long = "chunk-size", value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Number of rows shown in the preview table.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,

    /// Write the loaded data as CSV.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
