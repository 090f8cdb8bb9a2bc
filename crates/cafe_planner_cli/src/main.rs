//! Maintenance CLI for the planner store.
//!
//! # Responsibility
//! - Verify `cafe_planner_core` linkage (`ping`).
//! - Inspect, back up, restore and reset a store file without the UI.

use anyhow::{bail, Context, Result};
use cafe_planner_core::db::open_db;
use cafe_planner_core::model::category::resolve_display;
use cafe_planner_core::time::now_epoch_ms;
use cafe_planner_core::transfer::export_file_name;
use cafe_planner_core::{
    CategoryService, Confirmation, DataService, ExportFormat, SqliteCategoryRepository,
    SqliteTaskRepository, TaskService,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

const DB_PATH_ENV: &str = "CAFE_PLANNER_DB_PATH";
const DB_FILE_NAME: &str = "cafe_planner.sqlite3";

/// Cafe Planner store maintenance.
#[derive(Parser)]
#[command(name = "cafe-planner", version, about)]
struct Cli {
    /// Store file. Falls back to $CAFE_PLANNER_DB_PATH, then the temp dir.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print core ping and version.
    Ping,
    /// Print the three lanes and today's completion.
    Board,
    /// Seed the default menu into an empty category list.
    SeedDefaults,
    /// Print dashboard statistics.
    Stats,
    /// Write a backup to a file (default: dated name in the current dir).
    Export {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Replace all data with a JSON backup.
    Import {
        file: PathBuf,
        /// Confirm overwriting existing data; without it the file is only validated.
        #[arg(long)]
        yes: bool,
    },
    /// Delete all categories, orders and notes.
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl From<Format> for ExportFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Json => ExportFormat::Json,
            Format::Csv => ExportFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(cafe_planner_core::default_log_level());
        cafe_planner_core::init_logging(level, log_dir)?;
    }

    if let Command::Ping = cli.command {
        println!("cafe_planner_core ping={}", cafe_planner_core::ping());
        println!("cafe_planner_core version={}", cafe_planner_core::core_version());
        return Ok(());
    }

    let db_path = resolve_db_path(cli.db);
    let mut conn = open_db(&db_path)
        .with_context(|| format!("failed to open store at {}", db_path.display()))?;
    info!("event=cli_start module=cli status=ok");

    match cli.command {
        // Handled above.
        Command::Ping => {}
        Command::Board => {
            let categories = CategoryService::new(SqliteCategoryRepository::try_new(&conn)?)
                .list_categories()?;
            let board =
                TaskService::new(SqliteTaskRepository::try_new(&conn)?).board(now_epoch_ms())?;
            for lane in &board.lanes {
                println!("{} ({})", lane.time_block.label(), lane.tasks.len());
                for task in &lane.tasks {
                    let display = resolve_display(&categories, task.category_id);
                    println!(
                        "  [{}] {} {} - {}",
                        if task.is_completed() { "x" } else { " " },
                        display.icon,
                        task.title,
                        display.label
                    );
                }
            }
            println!("completed today: {}%", board.completion_percentage);
        }
        Command::SeedDefaults => {
            let seeded = CategoryService::new(SqliteCategoryRepository::try_new(&conn)?)
                .ensure_default_categories()?;
            println!("seeded {seeded} categories");
        }
        Command::Stats => {
            let stats = DataService::new(&mut conn).statistics(now_epoch_ms())?;
            println!(
                "orders={} active={} completed={} completion={}%",
                stats.total, stats.active, stats.completed, stats.completion_percentage
            );
            println!(
                "completed_today={} streak_days={}",
                stats.completed_today, stats.streak_days
            );
            for entry in &stats.by_time_block {
                println!(
                    "  {}: {}/{}",
                    entry.time_block.label(),
                    entry.tally.completed,
                    entry.tally.total
                );
            }
            for entry in &stats.by_category {
                println!(
                    "  {}: {}/{}",
                    entry.label, entry.tally.completed, entry.tally.total
                );
            }
        }
        Command::Export { format, out } => {
            let now_ms = now_epoch_ms();
            let format = ExportFormat::from(format);
            let service = DataService::new(&mut conn);
            let content = match format {
                ExportFormat::Json => service.export_json(now_ms)?,
                ExportFormat::Csv => service.export_csv()?,
            };
            let out = out.unwrap_or_else(|| PathBuf::from(export_file_name(format, now_ms)));
            std::fs::write(&out, content)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("wrote {}", out.display());
        }
        Command::Import { file, yes } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let mut service = DataService::new(&mut conn);
            if !yes {
                let summary = service.preview_import(&text)?;
                println!(
                    "valid backup: {} categories, {} orders, {} notes; rerun with --yes to overwrite",
                    summary.categories, summary.tasks, summary.notes
                );
                return Ok(());
            }
            let summary = service.import_json(&text, Confirmation::Confirmed)?;
            println!(
                "imported {} categories, {} orders, {} notes",
                summary.categories, summary.tasks, summary.notes
            );
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("reset deletes every category, order and note; rerun with --yes");
            }
            DataService::new(&mut conn).clear_all_data(Confirmation::Confirmed)?;
            println!("store cleared");
        }
    }
    Ok(())
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| {
        std::env::var(DB_PATH_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME))
}
