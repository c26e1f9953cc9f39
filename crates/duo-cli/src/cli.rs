//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use duo_ingest::Encoding;
use duo_model::SemanticLabel;

#[derive(Parser)]
#[command(
    name = "duo-stroom",
    version,
    about = "Transition rates and distributions for DUO mbo-hbo datasets",
    long_about = "Map the columns of a DUO mbo-hbo transition CSV to a fixed set of labels \
                  and compute weighted transition rates, shares of the total and student \
                  counts.\n\n\
                  Columns are suggested by name; use --map label=column to override."
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

    /// Log output format.
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

    /// Allow cell values (filter selections, categories) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the labels columns can be mapped to.
    Labels {
        #[arg(long = "format", value_enum, default_value = "table")]
        format: OutputFormatArg,
    },

    /// Profile a dataset and show how each label is mapped.
    Inspect(DatasetArgs),

    /// Weighted transition rate, overall or per group.
    Rate(GroupedArgs),

    /// Share of the total student count per category.
    Share(ShareArgs),

    /// Summed student counts, overall or per group.
    Totals(GroupedArgs),

    /// Overview: overall rate, rate and share per sector and region.
    Kpi(DatasetArgs),
}

#[derive(Args)]
pub struct DatasetArgs {
    /// Delimited text file with one row per group of students.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator (a single ASCII character).
    #[arg(long = "separator", default_value_t = ',')]
    pub separator: char,

    /// Text encoding of the file (utf8 or latin1).
    #[arg(long = "encoding", default_value = "utf8")]
    pub encoding: Encoding,

    /// JSON file mapping labels to columns, e.g. {"sector": "SECTOR"}.
    #[arg(long = "mapping-file", value_name = "PATH")]
    pub mapping_file: Option<PathBuf>,

    /// Map a label to a column (label=column); `label=` leaves it unmapped.
    ///
    /// Applied after --mapping-file. May be repeated.
    #[arg(long = "map", value_name = "LABEL=COLUMN")]
    pub map: Vec<String>,

    /// Keep only rows whose label column has one of the values (label=v1,v2).
    ///
    /// May be repeated; filters combine.
    #[arg(long = "filter", value_name = "LABEL=VALUES")]
    pub filter: Vec<String>,

    /// Fail on indicator cells that are not 0/1 or true/false instead of
    /// counting them as 0.
    #[arg(long = "strict-indicator")]
    pub strict_indicator: bool,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct GroupedArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Group by this label. May be repeated for nested groups.
    #[arg(long = "by", value_name = "LABEL")]
    pub by: Vec<SemanticLabel>,
}

#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Label whose categories split the total.
    #[arg(long = "by", value_name = "LABEL")]
    pub by: SemanticLabel,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
