//! Command entry points wired to the core crates.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use scan_cli::session::{self, Session};
use scan_export::{default_export_name, export_to_path};
use scan_ingest::{RefreshGuard, SourceConfig, load_table, source_status};
use scan_model::{
    DataPayload, DisplayCount, QueryState, QuickFilter, SortDirection, SortSpec, normalize_symbol,
    schema,
};
use scan_query::{SummaryStats, evaluate};

use crate::cli::{
    DirectionArg, ExportArgs, FilterArgs, PinCommand, QuickFilterArg, ViewArgs, WatchArgs,
};
use crate::render::{print_columns, print_pins, print_stats, print_status, print_view};

impl QuickFilterArg {
    fn into_filter(self) -> QuickFilter {
        match self {
            Self::Pinned => QuickFilter::Pinned,
            Self::Gappers => QuickFilter::Gap,
            Self::Hod => QuickFilter::HighOfDay,
            Self::Explosive => QuickFilter::Explosive,
            Self::PmActive => QuickFilter::PremarketActive,
            Self::Earnings => QuickFilter::Earnings,
        }
    }
}

/// Builds the query state from filter flags. Rejects sort columns outside
/// the declared registry.
fn query_state(filter: &FilterArgs, display: DisplayCount) -> Result<QueryState> {
    let mut state = QueryState {
        search: filter.search.clone(),
        archetype: filter.archetype.clone(),
        preset: filter.preset.clone(),
        display,
        ..QueryState::default()
    };
    for quick in &filter.quick {
        state.quick.insert(quick.into_filter());
    }
    if let Some(column) = &filter.sort {
        if schema().column(column).is_none() {
            bail!("unknown sort column: {column}");
        }
        let direction = match filter.direction {
            Some(DirectionArg::Asc) => SortDirection::Ascending,
            Some(DirectionArg::Desc) => SortDirection::Descending,
            None => SortDirection::initial_for(column),
        };
        state.sort = Some(SortSpec {
            column: column.clone(),
            direction,
        });
    }
    Ok(state)
}

fn warn_on_feed_error(session: &Session) {
    if let Some(message) = &session.table.error {
        eprintln!("warning: {message}");
    }
}

pub fn run_view(args: &ViewArgs, config: &SourceConfig, pins_file: Option<&Path>) -> Result<()> {
    let session = session::open(config, pins_file)?;
    warn_on_feed_error(&session);
    let display = if args.all {
        DisplayCount::All
    } else {
        DisplayCount::Limit(args.limit)
    };
    let state = query_state(&args.filter, display)?;
    let view = evaluate(&session.table, &state, session.pins.pins());
    print_view(&view, session.pins.pins());
    if args.stats {
        print_stats(&SummaryStats::compute(&view.rows, session.pins.pins()));
    }
    Ok(())
}

pub fn run_export(args: &ExportArgs, config: &SourceConfig, pins_file: Option<&Path>) -> Result<()> {
    let session = session::open(config, pins_file)?;
    warn_on_feed_error(&session);
    // The export always covers the whole filtered order.
    let state = query_state(&args.filter, DisplayCount::All)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_export_name()));
    let count = export_to_path(&output, &session.table, &state, session.pins.pins())
        .with_context(|| format!("export to {}", output.display()))?;
    println!("exported {count} rows to {}", output.display());
    Ok(())
}

pub fn run_status(config: &SourceConfig) -> Result<()> {
    print_status(&source_status(config));
    Ok(())
}

pub fn run_dump(config: &SourceConfig) -> Result<()> {
    let payload = DataPayload::from_table(&load_table(config));
    let json = serde_json::to_string_pretty(&payload).context("serialize data payload")?;
    println!("{json}");
    Ok(())
}

pub fn run_columns() -> Result<()> {
    print_columns();
    Ok(())
}

pub fn run_pin(command: &PinCommand, pins_file: Option<&Path>) -> Result<()> {
    let mut store = session::open_pins(pins_file)?;
    match command {
        PinCommand::Add { symbols } => {
            for symbol in symbols {
                let key = normalize_symbol(symbol);
                if store.add(symbol) {
                    println!("pinned {key}");
                } else {
                    println!("already pinned {key}");
                }
            }
            store.save().context("save pin store")?;
        }
        PinCommand::Remove { symbols } => {
            for symbol in symbols {
                let key = normalize_symbol(symbol);
                if store.remove(symbol) {
                    println!("unpinned {key}");
                } else {
                    println!("not pinned {key}");
                }
            }
            store.save().context("save pin store")?;
        }
        PinCommand::List => print_pins(store.pins()),
    }
    Ok(())
}

/// Polls the source on a fixed interval and re-renders the view whenever the
/// file's modification timestamp changes. Runs until interrupted.
pub fn run_watch(args: &WatchArgs, config: &SourceConfig, pins_file: Option<&Path>) -> Result<()> {
    let interval = Duration::from_secs(args.interval_secs.max(1));
    info!(interval_secs = interval.as_secs(), "watching feed");
    let mut guard = RefreshGuard::default();
    loop {
        let status = source_status(config);
        if let Some(message) = &status.error {
            warn!("{message}");
        }
        if guard.is_stale(&status) {
            run_view(&args.view, config, pins_file)?;
            guard.observe(&status);
        }
        thread::sleep(interval);
    }
}
