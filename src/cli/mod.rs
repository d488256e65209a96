//! Command-line front end: `view` renders the summary table, `check` validates a database.

pub mod output;
pub mod table;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::{Config, ConfigManager},
    core::services::{
        summary_service::{BucketRow, EntryRow},
        ServiceError, SummaryService, View, ViewRequest,
    },
    errors::RecorderError,
    ledger::{BucketSortKey, CalendarDate, EmptyBuckets, EntrySortKey, Interval, SortDirection},
    storage::{JsonStorage, StorageBackend},
};

use table::{Alignment, Table, TableColumn};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Recorder(#[from] RecorderError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0}")]
    InvalidArgument(String),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "budget_recorder_cli")]
#[command(version)]
#[command(about = "Recurring transactions and period balances from a budget database", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the entries, or their balances per period
    View(ViewArgs),
    /// Load and validate the database without rendering it
    Check(DatabaseArgs),
}

#[derive(Args, Debug)]
struct DatabaseArgs {
    /// Database file; defaults to the configured one
    #[arg(long)]
    database: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ViewArgs {
    #[command(flatten)]
    database: DatabaseArgs,
    /// never, daily, weekly, monthly or yearly
    #[arg(long, value_parser = parse_interval)]
    interval: Option<Interval>,
    /// Column to sort by
    #[arg(long)]
    sort: Option<String>,
    #[arg(long, conflicts_with = "descending")]
    ascending: bool,
    #[arg(long)]
    descending: bool,
    /// Drop periods without any entry
    #[arg(long)]
    hide_empty: bool,
    /// Maximum number of rows (0 to 500)
    #[arg(long)]
    limit: Option<usize>,
    /// Ignore occurrences after this day (dd.mm.yyyy)
    #[arg(long, value_parser = parse_date)]
    until: Option<CalendarDate>,
}

fn parse_interval(value: &str) -> Result<Interval, String> {
    Interval::from_label(value).ok_or_else(|| format!("unknown interval `{value}`"))
}

fn parse_date(value: &str) -> Result<CalendarDate, String> {
    CalendarDate::parse(value).map_err(|err| err.to_string())
}

/// Parses the process arguments, runs the command and returns the exit code.
pub fn run_cli() -> i32 {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            output::error(&err);
            1
        }
    }
}

pub fn run(cli: Cli) -> CliResult<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    debug!(path = %manager.path().display(), "configuration loaded");
    match cli.command {
        Command::View(args) => view(&manager, &config, args),
        Command::Check(args) => check(&manager, &config, args),
    }
}

fn storage(manager: &ConfigManager, config: &Config, args: &DatabaseArgs) -> JsonStorage {
    let path = args
        .database
        .clone()
        .unwrap_or_else(|| manager.database_path(config));
    JsonStorage::new(path, Some(manager.backup_dir(config)))
}

fn view(manager: &ConfigManager, config: &Config, args: ViewArgs) -> CliResult<()> {
    let store = storage(manager, config, &args.database).load()?;
    let request = build_request(config, &args)?;
    let view = SummaryService::view(&store, &request, &config.money_format())?;
    if view.is_empty() {
        output::warning("nothing to show");
        return Ok(());
    }
    output::section(format!("{} view", request.interval));
    let table = match &view {
        View::Entries(rows) => entry_table(rows, &request),
        View::Buckets(rows) => bucket_table(rows, &request),
    };
    output::table(&table.render_lines());
    Ok(())
}

fn check(manager: &ConfigManager, config: &Config, args: DatabaseArgs) -> CliResult<()> {
    let storage = storage(manager, config, &args);
    let store = storage.load()?;
    let recurring = store.iter().filter(|(_, entry)| entry.is_recurring()).count();
    let occurrences = SummaryService::expanded_entries(&store).len();
    output::success(format!(
        "{}: {} entries ({} recurring), {} occurrences, {} categories",
        storage.database_path().display(),
        store.len(),
        recurring,
        occurrences,
        store.categories().len()
    ));
    Ok(())
}

fn build_request(config: &Config, args: &ViewArgs) -> CliResult<ViewRequest> {
    let mut request = config.view_request();
    if let Some(interval) = args.interval {
        request.interval = interval;
    }
    if args.hide_empty {
        request.empty_buckets = EmptyBuckets::Suppress;
    }
    if let Some(limit) = args.limit {
        request.display_limit = limit;
    }
    if args.until.is_some() {
        request.until = args.until;
    }
    let direction = if args.ascending {
        Some(SortDirection::Ascending)
    } else if args.descending {
        Some(SortDirection::Descending)
    } else {
        None
    };
    if request.interval.is_never() {
        if let Some(label) = &args.sort {
            request.entry_sort = EntrySortKey::from_label(label)
                .ok_or_else(|| CliError::InvalidArgument(format!("unknown entry column `{label}`")))?;
        }
        request.entry_direction = direction.unwrap_or(request.entry_direction);
    } else {
        if let Some(label) = &args.sort {
            request.bucket_sort = BucketSortKey::from_label(label).ok_or_else(|| {
                CliError::InvalidArgument(format!("unknown bucket column `{label}`"))
            })?;
        }
        request.bucket_direction = direction.unwrap_or(request.bucket_direction);
    }
    Ok(request)
}

/// Header label with the sort marker appended to the active column.
fn header(label: &str, active: bool, direction: SortDirection) -> String {
    if active {
        format!("{} {}", label, direction.marker())
    } else {
        label.to_string()
    }
}

fn entry_table(rows: &[EntryRow], request: &ViewRequest) -> Table {
    let column = |key: EntrySortKey, alignment| {
        TableColumn::new(
            header(key.label(), key == request.entry_sort, request.entry_direction),
            alignment,
        )
    };
    Table {
        columns: vec![
            column(EntrySortKey::Amount, Alignment::Right),
            column(EntrySortKey::Type, Alignment::Left),
            column(EntrySortKey::Subtype, Alignment::Left),
            column(EntrySortKey::Name, Alignment::Left).max_width(24),
            column(EntrySortKey::Location, Alignment::Left).max_width(24),
            column(EntrySortKey::Date, Alignment::Left),
            column(EntrySortKey::Repeat, Alignment::Left),
            column(EntrySortKey::Infinite, Alignment::Left),
            column(EntrySortKey::Until, Alignment::Left),
        ],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.money.clone(),
                    row.type_name.clone(),
                    row.subtype_name.clone(),
                    row.name.clone(),
                    row.location.clone(),
                    row.date.clone(),
                    row.repeat.clone(),
                    row.duration.clone(),
                    row.until.clone(),
                ]
            })
            .collect(),
    }
}

fn bucket_table(rows: &[BucketRow], request: &ViewRequest) -> Table {
    let column = |key: BucketSortKey, alignment| {
        TableColumn::new(
            header(key.label(), key == request.bucket_sort, request.bucket_direction),
            alignment,
        )
    };
    Table {
        columns: vec![
            column(BucketSortKey::Start, Alignment::Left),
            column(BucketSortKey::End, Alignment::Left),
            column(BucketSortKey::Balance, Alignment::Right),
            column(BucketSortKey::Count, Alignment::Right),
        ],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.start.clone(),
                    row.end.clone(),
                    row.balance.clone(),
                    row.count.to_string(),
                ]
            })
            .collect(),
    }
}
