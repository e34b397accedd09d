//! CLI argument definitions for the screener terminal.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use scan_model::DEFAULT_DISPLAY;

#[derive(Parser)]
#[command(
    name = "scanterm",
    version,
    about = "Read-only terminal for a ticker screener feed",
    long_about = "Browse, filter, sort and export the latest screener snapshot.\n\n\
                  The feed is a CSV file produced by an external scanner. The newest\n\
                  CSV in the watched folder wins, else the explicit --csv path, else\n\
                  screener_master.csv beside the executable."
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

    /// Explicit feed file, used when the watched folder yields nothing.
    #[arg(long = "csv", value_name = "PATH", global = true)]
    pub csv: Option<PathBuf>,

    /// Watched folder; the newest CSV inside becomes the feed.
    #[arg(long = "folder", value_name = "DIR", global = true)]
    pub folder: Option<PathBuf>,

    /// Pin store file (default: scanterm_pins.json in the working directory).
    #[arg(long = "pins-file", value_name = "PATH", global = true)]
    pub pins_file: Option<PathBuf>,

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
    /// Render the filtered, sorted view as a table.
    View(ViewArgs),

    /// Write the filtered, sorted view as a fully quoted CSV.
    Export(ExportArgs),

    /// Report which feed file is active and when it changed.
    Status,

    /// Print the full data payload as JSON.
    Dump,

    /// List the declared feed columns and their types.
    Columns,

    /// Manage the persisted set of pinned symbols.
    Pin(PinArgs),

    /// Poll the feed and re-render whenever the file changes.
    Watch(WatchArgs),
}

/// Filter and sort options shared by `view`, `export` and `watch`.
#[derive(Args)]
pub struct FilterArgs {
    /// Case-insensitive substring matched against symbol and name.
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Exact archetype filter (e.g. EXPLOSIVE).
    #[arg(long, value_name = "NAME", default_value = "")]
    pub archetype: String,

    /// Preset name matched against each row's preset list.
    #[arg(long, value_name = "NAME", default_value = "")]
    pub preset: String,

    /// Quick filter toggle; may be given multiple times.
    #[arg(long = "quick", value_enum, value_name = "FILTER")]
    pub quick: Vec<QuickFilterArg>,

    /// Sort column (a feed column name, e.g. master_rank or gap_pct).
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort direction (default: ascending for master_rank, else descending).
    #[arg(long, value_enum, requires = "sort")]
    pub direction: Option<DirectionArg>,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of rows to show.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DISPLAY, conflicts_with = "all")]
    pub limit: usize,

    /// Show every matching row.
    #[arg(long)]
    pub all: bool,

    /// Append summary statistics for the shown rows.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file (default: a date-stamped name in the working directory).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct PinArgs {
    #[command(subcommand)]
    pub command: PinCommand,
}

#[derive(Subcommand)]
pub enum PinCommand {
    /// Pin one or more symbols.
    Add {
        #[arg(value_name = "SYMBOL", required = true)]
        symbols: Vec<String>,
    },

    /// Unpin one or more symbols.
    Remove {
        #[arg(value_name = "SYMBOL", required = true)]
        symbols: Vec<String>,
    },

    /// List pinned symbols.
    List,
}

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Poll interval in seconds.
    #[arg(long = "interval-secs", value_name = "SECS", default_value_t = 30)]
    pub interval_secs: u64,
}

/// CLI quick-filter choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum QuickFilterArg {
    /// Only pinned symbols.
    Pinned,
    /// Only gaps above 5%.
    Gappers,
    /// Only rows at the high of day.
    Hod,
    /// Only the explosive archetype.
    Explosive,
    /// Only premarket-active rows.
    PmActive,
    /// Only rows with an earnings flag.
    Earnings,
}

/// CLI sort-direction choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
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
