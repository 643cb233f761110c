//! CLI argument definitions for the SPMF runner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "spmf",
    version,
    about = "Sequential pattern and episode mining on CSV tables via SPMF",
    long_about = "Mine sequential patterns, frequent episodes and episode rules from CSV tables.\n\n\
                  Item labels are coded to integers, handed to the SPMF jar and decoded\n\
                  back into readable patterns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow item labels from the input data to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    #[command(flatten)]
    pub runner: RunnerArgs,
}

/// Where to find the executable and how to launch it.
#[derive(Args, Clone, Default)]
pub struct RunnerArgs {
    /// Runner config file (default: ./spmf.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Path to spmf.jar.
    #[arg(long = "jar", value_name = "PATH", global = true)]
    pub jar: Option<PathBuf>,

    /// Heap ceiling for the JVM, in megabytes.
    #[arg(long = "memory", value_name = "MB", global = true)]
    pub memory: Option<u32>,

    /// Launcher used to start the jar.
    #[arg(long = "java", value_name = "PROGRAM", global = true)]
    pub java: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Mine sequential patterns from a long-form CSV (one row per item).
    Sequences(SequencesArgs),

    /// Mine frequent episodes from an event-stream CSV.
    Episodes(EpisodesArgs),

    /// Mine episode rules from an event-stream CSV.
    Rules(RulesArgs),

    /// Write the coded input text and symbol table without running the tool.
    Encode(EncodeArgs),

    /// Decode a raw result file written by the tool.
    Decode(DecodeArgs),

    /// List the supported algorithms.
    Algorithms,
}

/// Options shared by the mining subcommands.
#[derive(Args)]
pub struct RunArgs {
    /// Write the result table as CSV instead of printing it.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the command line that would be run and exit.
    #[arg(long = "print-command")]
    pub print_command: bool,

    /// Run an algorithm by name instead of a built-in one.
    #[arg(long = "custom", value_name = "NAME")]
    pub custom: Option<String>,

    /// Positional parameter for --custom, repeatable, in order.
    #[arg(long = "param", value_name = "VALUE", requires = "custom")]
    pub params: Vec<String>,
}

#[derive(Args)]
pub struct SequenceColumns {
    /// Column holding the sequence identifier.
    #[arg(long = "id-column", default_value = "ID")]
    pub id_column: String,

    /// Column holding the integer time point.
    #[arg(long = "time-column", default_value = "Time Points")]
    pub time_column: String,

    /// Column holding the item label.
    #[arg(long = "item-column", default_value = "Items")]
    pub item_column: String,
}

#[derive(Args)]
pub struct EpisodeColumnArgs {
    /// Column holding space-separated items.
    #[arg(long = "itemset-column", default_value = "Itemset")]
    pub itemset_column: String,

    /// Column holding the integer timestamp.
    #[arg(long = "time-column", default_value = "Time points")]
    pub time_column: String,

    /// The input has no timestamp column; rows are numbered in order.
    #[arg(long = "no-timestamps")]
    pub no_timestamps: bool,
}

#[derive(Parser)]
pub struct SequencesArgs {
    /// Long-form CSV with one row per observed item.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub columns: SequenceColumns,

    #[arg(long = "algorithm", value_enum, default_value = "prefix-span")]
    pub algorithm: SequenceAlgorithmArg,

    /// Minimum support as a fraction of sequences, in (0, 1].
    #[arg(long = "min-support", default_value_t = 0.5)]
    pub min_support: f64,

    /// Longest pattern to report (required by VMSP).
    #[arg(long = "max-pattern-length")]
    pub max_pattern_length: Option<u64>,

    /// Largest gap between consecutive itemsets (required by VMSP).
    #[arg(long = "max-gap")]
    pub max_gap: Option<u64>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser)]
pub struct EpisodesArgs {
    /// Event-stream CSV with one row per event group.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub columns: EpisodeColumnArgs,

    #[arg(long = "algorithm", value_enum, default_value = "tke")]
    pub algorithm: EpisodeAlgorithmArg,

    /// Number of episodes to keep (TKE).
    #[arg(long = "k", default_value_t = 10)]
    pub k: u64,

    /// Absolute minimum support (EMMA, AFEM).
    #[arg(long = "min-support", default_value_t = 2)]
    pub min_support: u64,

    /// Longest time window an episode may span.
    #[arg(long = "max-window", default_value_t = 2)]
    pub max_window: u64,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Event-stream CSV with one row per event group.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub columns: EpisodeColumnArgs,

    /// Number of rules to keep.
    #[arg(long = "k", default_value_t = 10)]
    pub k: u64,

    /// Longest time window a rule may span.
    #[arg(long = "max-window", default_value_t = 2)]
    pub max_window: u64,

    /// Minimum confidence, in [0, 1].
    #[arg(long = "min-confidence", default_value_t = 0.5)]
    pub min_confidence: f64,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser)]
pub struct EncodeArgs {
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[arg(long = "mode", value_enum, default_value = "sequences")]
    pub mode: EncodeModeArg,

    /// Sequence-table column names (sequences mode).
    #[arg(long = "id-column", default_value = "ID")]
    pub id_column: String,

    #[arg(long = "item-column", default_value = "Items")]
    pub item_column: String,

    /// Itemset column (episodes mode).
    #[arg(long = "itemset-column", default_value = "Itemset")]
    pub itemset_column: String,

    /// Time column; defaults to "Time Points" for sequences, "Time points" for episodes.
    #[arg(long = "time-column")]
    pub time_column: Option<String>,

    /// Episodes mode input has no timestamp column.
    #[arg(long = "no-timestamps")]
    pub no_timestamps: bool,

    /// Where to write the coded text.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Where to write the symbol table (default: <OUTPUT>.codec.json).
    #[arg(long = "codec", value_name = "PATH")]
    pub codec: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// Result file written by the tool.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Symbol table written by `encode`; codes are shown as-is without one.
    #[arg(long = "codec", value_name = "PATH")]
    pub codec: Option<PathBuf>,

    #[arg(long = "shape", value_enum, default_value = "sequential-pattern")]
    pub shape: ShapeArg,

    /// Write the decoded table as CSV instead of printing it.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SequenceAlgorithmArg {
    PrefixSpan,
    Spade,
    Vmsp,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EpisodeAlgorithmArg {
    Tke,
    Emma,
    Afem,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncodeModeArg {
    Sequences,
    Episodes,
}

/// Output table layout for `decode`.
#[derive(Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    SequentialPattern,
    Episode,
    Rule,
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
