//! CLI argument definitions for the unnest tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "unnest",
    version,
    about = "Flatten nested JSON records into table rows",
    long_about = "Flatten nested JSON records into table rows.\n\n\
                  A schema names the nested fields that become columns. Sibling arrays are\n\
                  merged row by row instead of multiplied, and each value spans the rows\n\
                  that do not redefine its column."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
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
    /// Flatten a JSON document (one object or an array of objects).
    Flatten(FlattenArgs),

    /// List the columns a schema produces.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct FlattenArgs {
    /// JSON data file, or `-` to read standard input.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Schema file (`.json` or `.toml`).
    #[arg(long = "schema", short = 's', value_name = "FILE")]
    pub schema: PathBuf,

    /// Top-level field whose value names each item's group (default: item index).
    #[arg(long = "group-by", value_name = "FIELD")]
    pub group_by: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "markdown")]
    pub format: OutputFormatArg,

    /// Columns to output, in order (default: every column in first-seen order).
    #[arg(long = "columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Column to remove from every row; rows left empty are dropped.
    #[arg(long = "exclude", value_name = "COLUMN")]
    pub exclude: Vec<String>,

    /// Sort groups by the value of this column in their first row.
    #[arg(long = "sort-by", value_name = "COLUMN")]
    pub sort_by: Option<String>,

    /// Write the output to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Schema file (`.json` or `.toml`).
    #[arg(long = "schema", short = 's', value_name = "FILE")]
    pub schema: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Markdown,
    Table,
    Json,
    Data,
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
