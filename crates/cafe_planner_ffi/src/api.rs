//! FFI use-case API for the planner UI shell.
//!
//! # Responsibility
//! - Expose board, task, category, note and backup use-cases via FRB.
//! - Translate core errors into flat response envelopes the UI shows as
//!   alerts.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Ids and enum values cross the boundary as strings.
//! - Every call opens the store at the configured path; no cached state.

use cafe_planner_core::board::stats::Tally;
use cafe_planner_core::db::open_db;
use cafe_planner_core::model::category::resolve_display;
use cafe_planner_core::time::now_epoch_ms;
use cafe_planner_core::transfer::export_file_name;
use cafe_planner_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Category, CategoryService, Confirmation, DataService, DragOutcome, DropTarget, ExportFormat,
    Note, NoteService, ServiceError, SqliteCategoryRepository, SqliteNoteRepository,
    SqliteTaskRepository, Task, TaskEdit, TaskService, Theme, TimeBlock,
};
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_PATH_ENV: &str = "CAFE_PLANNER_DB_PATH";
const DB_FILE_NAME: &str = "cafe_planner.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic mutation result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created/changed record, when there is one.
    pub id: Option<String>,
    pub message: String,
}

/// Task card as rendered on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub category_id: String,
    /// Resolved label; "Special Order" when the category is gone.
    pub category_label: String,
    pub category_icon: String,
    pub category_theme: Option<String>,
    pub is_special_order: bool,
    /// `morning|afternoon|evening`.
    pub time_block: String,
    /// `active|completed`.
    pub status: String,
    pub completed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneItem {
    pub time_block: String,
    pub label: String,
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardResponse {
    pub ok: bool,
    pub message: String,
    pub lanes: Vec<LaneItem>,
    pub completion_percentage: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveResponse {
    pub ok: bool,
    pub message: String,
    /// `lane_changed|reordered|unchanged`.
    pub outcome: String,
    /// Task ids in their new in-memory order.
    pub ordered_task_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryItem {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub theme: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoriesResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<CategoryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub content: String,
    pub created_at: i64,
    pub theme: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<NoteItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryDayItem {
    /// `YYYY-MM-DD` in the reference offset.
    pub date: String,
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryResponse {
    pub ok: bool,
    pub message: String,
    pub days: Vec<HistoryDayItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyItem {
    pub label: String,
    pub total: u32,
    pub completed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsResponse {
    pub ok: bool,
    pub message: String,
    pub total: u32,
    pub active: u32,
    pub completed: u32,
    pub completion_percentage: u8,
    pub completed_today: u32,
    pub streak_days: u32,
    pub by_time_block: Vec<TallyItem>,
    pub by_category: Vec<TallyItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub message: String,
    /// Suggested download file name.
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResponse {
    pub ok: bool,
    pub message: String,
    /// One entry per validation problem; empty on success.
    pub errors: Vec<String>,
    pub categories: u32,
    pub tasks: u32,
    pub notes: u32,
}

/// Loads the visible board: three lanes plus today's completion percentage.
#[flutter_rust_bridge::frb(sync)]
pub fn board_load() -> BoardResponse {
    let result = with_conn("board_load", |conn| {
        let categories = category_service(conn)?.list_categories()?;
        let board = task_service(conn)?.board(now_epoch_ms())?;
        Ok((categories, board))
    });
    match result {
        Ok((categories, board)) => BoardResponse {
            ok: true,
            message: format!("{} order(s) on the board.", board.visible_count()),
            completion_percentage: board.completion_percentage,
            lanes: board
                .lanes
                .iter()
                .map(|lane| LaneItem {
                    time_block: lane.time_block.as_str().to_string(),
                    label: lane.time_block.label().to_string(),
                    tasks: lane
                        .tasks
                        .iter()
                        .map(|task| to_task_item(task, &categories))
                        .collect(),
                })
                .collect(),
        },
        Err(message) => BoardResponse {
            message,
            ..BoardResponse::default()
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_create(title: String, category_id: String, time_block: String) -> ActionResponse {
    let parsed = parse_id(&category_id, "category_id")
        .and_then(|category_id| Ok((category_id, parse_time_block(&time_block)?)));
    let (category_id, time_block) = match parsed {
        Ok(values) => values,
        Err(message) => return ActionResponse::failure(message),
    };
    action("task_create", "Order placed.", |conn| {
        let task =
            task_service(conn)?.create_task(&title, category_id, time_block, now_epoch_ms())?;
        Ok(Some(task.id))
    })
}

/// Edits title, category and/or lane; `None` leaves a field unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(
    id: String,
    title: Option<String>,
    category_id: Option<String>,
    time_block: Option<String>,
) -> ActionResponse {
    let parsed = (|| -> Result<(Uuid, TaskEdit), String> {
        let id = parse_id(&id, "id")?;
        let edit = TaskEdit {
            title,
            category_id: category_id
                .as_deref()
                .map(|value| parse_id(value, "category_id"))
                .transpose()?,
            time_block: time_block.as_deref().map(parse_time_block).transpose()?,
        };
        Ok((id, edit))
    })();
    let (id, edit) = match parsed {
        Ok(values) => values,
        Err(message) => return ActionResponse::failure(message),
    };
    action("task_edit", "Order updated.", |conn| {
        task_service(conn)?.edit_task(id, &edit)?;
        Ok(Some(id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> ActionResponse {
    let id = match parse_id(&id, "id") {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    action("task_toggle", "Order status changed.", |conn| {
        task_service(conn)?.toggle_task(id, now_epoch_ms())?;
        Ok(Some(id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> ActionResponse {
    let id = match parse_id(&id, "id") {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    action("task_delete", "Order removed.", |conn| {
        task_service(conn)?.delete_task(id)?;
        Ok(Some(id))
    })
}

/// Applies one drag-and-drop.
///
/// `ordered_task_ids` is the UI's current in-memory order. Pass
/// `over_task_id` when released over a card, otherwise `over_lane`.
/// Lane changes are saved; reordering is returned but not saved.
#[flutter_rust_bridge::frb(sync)]
pub fn task_move(
    ordered_task_ids: Vec<String>,
    active_id: String,
    over_task_id: Option<String>,
    over_lane: Option<String>,
) -> MoveResponse {
    let parsed = (|| -> Result<(Vec<Uuid>, Uuid, DropTarget), String> {
        let order = ordered_task_ids
            .iter()
            .map(|value| parse_id(value, "ordered_task_ids"))
            .collect::<Result<Vec<_>, _>>()?;
        let active_id = parse_id(&active_id, "active_id")?;
        let target = match (over_task_id.as_deref(), over_lane.as_deref()) {
            (Some(task_id), _) => DropTarget::Task(parse_id(task_id, "over_task_id")?),
            (None, Some(lane)) => DropTarget::Lane(parse_time_block(lane)?),
            (None, None) => return Err("drop target is required".to_string()),
        };
        Ok((order, active_id, target))
    })();
    let (order, active_id, target) = match parsed {
        Ok(values) => values,
        Err(message) => return MoveResponse::failure(message),
    };

    let result = with_conn("task_move", |conn| {
        let service = task_service(conn)?;
        let mut tasks = arrange(service.list_tasks()?, &order);
        let outcome = service.move_task(&mut tasks, active_id, target)?;
        Ok((outcome, tasks))
    });
    match result {
        Ok((outcome, tasks)) => MoveResponse {
            ok: true,
            message: "Board updated.".to_string(),
            outcome: outcome_label(outcome).to_string(),
            ordered_task_ids: tasks.iter().map(|task| task.id.to_string()).collect(),
        },
        Err(message) => MoveResponse::failure(message),
    }
}

/// Completed orders that have left the board, newest day first.
#[flutter_rust_bridge::frb(sync)]
pub fn history_load() -> HistoryResponse {
    let result = with_conn("history_load", |conn| {
        let categories = category_service(conn)?.list_categories()?;
        let days = task_service(conn)?.history(now_epoch_ms())?;
        Ok((categories, days))
    });
    match result {
        Ok((categories, days)) => HistoryResponse {
            ok: true,
            message: format!("{} day(s) in history.", days.len()),
            days: days
                .iter()
                .map(|day| HistoryDayItem {
                    date: day.date.format("%Y-%m-%d").to_string(),
                    tasks: day
                        .tasks
                        .iter()
                        .map(|task| to_task_item(task, &categories))
                        .collect(),
                })
                .collect(),
        },
        Err(message) => HistoryResponse {
            message,
            ..HistoryResponse::default()
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn category_list() -> CategoriesResponse {
    match with_conn("category_list", |conn| {
        category_service(conn)?.list_categories()
    }) {
        Ok(categories) => CategoriesResponse {
            ok: true,
            message: format!("{} categories.", categories.len()),
            items: categories.iter().map(to_category_item).collect(),
        },
        Err(message) => CategoriesResponse {
            message,
            ..CategoriesResponse::default()
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn category_create(label: String, icon: String, theme: String) -> ActionResponse {
    let theme = match parse_theme(&theme) {
        Ok(theme) => theme,
        Err(message) => return ActionResponse::failure(message),
    };
    action("category_create", "Category added.", |conn| {
        let category = category_service(conn)?.create_category(&label, &icon, theme)?;
        Ok(Some(category.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn category_update(id: String, label: String, icon: String, theme: String) -> ActionResponse {
    let parsed = parse_id(&id, "id").and_then(|id| Ok((id, parse_theme(&theme)?)));
    let (id, theme) = match parsed {
        Ok(values) => values,
        Err(message) => return ActionResponse::failure(message),
    };
    action("category_update", "Category updated.", |conn| {
        let category = Category::with_id(id, label.as_str(), icon.as_str(), theme);
        category_service(conn)?.update_category(&category)?;
        Ok(Some(id))
    })
}

/// Deletes a category; its orders remain as "Special Order".
#[flutter_rust_bridge::frb(sync)]
pub fn category_delete(id: String) -> ActionResponse {
    let id = match parse_id(&id, "id") {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    action("category_delete", "Category removed.", |conn| {
        category_service(conn)?.delete_category(id)?;
        Ok(Some(id))
    })
}

/// Seeds the default menu into an empty category list.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_seed_defaults() -> ActionResponse {
    action("categories_seed_defaults", "Menu ready.", |conn| {
        category_service(conn)?.ensure_default_categories()?;
        Ok(None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_list() -> NotesResponse {
    match with_conn("note_list", |conn| note_service(conn)?.list_notes()) {
        Ok(notes) => NotesResponse {
            ok: true,
            message: format!("{} note(s).", notes.len()),
            items: notes.iter().map(to_note_item).collect(),
        },
        Err(message) => NotesResponse {
            message,
            ..NotesResponse::default()
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_create(content: String, theme: String) -> ActionResponse {
    let theme = match parse_theme(&theme) {
        Ok(theme) => theme,
        Err(message) => return ActionResponse::failure(message),
    };
    action("note_create", "Note pinned.", |conn| {
        let note = note_service(conn)?.create_note(&content, theme, now_epoch_ms())?;
        Ok(Some(note.id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: String) -> ActionResponse {
    let id = match parse_id(&id, "id") {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    action("note_delete", "Note removed.", |conn| {
        note_service(conn)?.delete_note(id)?;
        Ok(Some(id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn stats_load() -> StatsResponse {
    match with_conn("stats_load", |conn| {
        DataService::new(conn).statistics(now_epoch_ms())
    }) {
        Ok(stats) => StatsResponse {
            ok: true,
            message: String::new(),
            total: to_u32(stats.total),
            active: to_u32(stats.active),
            completed: to_u32(stats.completed),
            completion_percentage: stats.completion_percentage,
            completed_today: to_u32(stats.completed_today),
            streak_days: stats.streak_days,
            by_time_block: stats
                .by_time_block
                .iter()
                .map(|entry| to_tally_item(entry.time_block.label(), entry.tally))
                .collect(),
            by_category: stats
                .by_category
                .iter()
                .map(|entry| to_tally_item(&entry.label, entry.tally))
                .collect(),
        },
        Err(message) => StatsResponse {
            message,
            ..StatsResponse::default()
        },
    }
}

/// Exports a backup. `format` is `json` or `csv`.
#[flutter_rust_bridge::frb(sync)]
pub fn export_data(format: String) -> ExportResponse {
    let format = match format.trim().to_ascii_lowercase().as_str() {
        "json" => ExportFormat::Json,
        "csv" => ExportFormat::Csv,
        other => {
            return ExportResponse {
                message: format!("unsupported export format `{other}`; expected json|csv"),
                ..ExportResponse::default()
            }
        }
    };
    let now_ms = now_epoch_ms();
    match with_conn("export_data", |conn| {
        let service = DataService::new(conn);
        match format {
            ExportFormat::Json => service.export_json(now_ms),
            ExportFormat::Csv => service.export_csv(),
        }
    }) {
        Ok(content) => ExportResponse {
            ok: true,
            message: "Backup ready.".to_string(),
            file_name: export_file_name(format, now_ms),
            content,
        },
        Err(message) => ExportResponse {
            message,
            ..ExportResponse::default()
        },
    }
}

/// Validates a JSON backup and reports what an import would write.
#[flutter_rust_bridge::frb(sync)]
pub fn import_preview(content: String) -> ImportResponse {
    import_with("import_preview", |service| service.preview_import(&content))
}

/// Replaces all data with a JSON backup.
///
/// `confirmed` must come from an explicit user confirmation; `false`
/// validates and returns without writing.
#[flutter_rust_bridge::frb(sync)]
pub fn import_data(content: String, confirmed: bool) -> ImportResponse {
    import_with("import_data", |service| {
        service.import_json(&content, Confirmation::from_flag(confirmed))
    })
}

/// Deletes all categories, orders and notes after explicit confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_all_data(confirmed: bool) -> ActionResponse {
    action("clear_all_data", "All data cleared.", |conn| {
        DataService::new(conn).clear_all_data(Confirmation::from_flag(confirmed))?;
        Ok(None)
    })
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<Uuid>) -> Self {
        Self {
            ok: true,
            id: id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

impl MoveResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

fn action(
    op: &'static str,
    success_message: &str,
    f: impl FnOnce(&mut Connection) -> Result<Option<Uuid>, ServiceError>,
) -> ActionResponse {
    match with_conn(op, f) {
        Ok(id) => ActionResponse::success(success_message, id),
        Err(message) => ActionResponse::failure(message),
    }
}

fn import_with(
    op: &'static str,
    f: impl FnOnce(&mut DataService<'_>) -> Result<cafe_planner_core::ImportSummary, ServiceError>,
) -> ImportResponse {
    let mut conn = match open_store(op) {
        Ok(conn) => conn,
        Err(message) => {
            return ImportResponse {
                message,
                ..ImportResponse::default()
            }
        }
    };
    let mut service = DataService::new(&mut conn);
    match f(&mut service) {
        Ok(summary) => ImportResponse {
            ok: true,
            message: format!(
                "{} categories, {} orders, {} notes.",
                summary.categories, summary.tasks, summary.notes
            ),
            errors: Vec::new(),
            categories: to_u32(summary.categories),
            tasks: to_u32(summary.tasks),
            notes: to_u32(summary.notes),
        },
        Err(ServiceError::Import(err)) => ImportResponse {
            message: format!("{op} failed: backup is invalid"),
            errors: err.errors,
            ..ImportResponse::default()
        },
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op={op} error={err}");
            ImportResponse {
                message: format!("{op} failed: {err}"),
                ..ImportResponse::default()
            }
        }
    }
}

fn with_conn<T>(
    op: &'static str,
    f: impl FnOnce(&mut Connection) -> Result<T, ServiceError>,
) -> Result<T, String> {
    let mut conn = open_store(op)?;
    f(&mut conn).map_err(|err| {
        error!("event=ffi_call module=ffi status=error op={op} error={err}");
        format!("{op} failed: {err}")
    })
}

fn open_store(op: &'static str) -> Result<Connection, String> {
    open_db(resolve_db_path()).map_err(|err| {
        error!("event=ffi_call module=ffi status=error op={op} error_code=db_open_failed error={err}");
        format!("{op} failed: store open failed: {err}")
    })
}

fn task_service(conn: &Connection) -> Result<TaskService<SqliteTaskRepository<'_>>, ServiceError> {
    Ok(TaskService::new(SqliteTaskRepository::try_new(conn)?))
}

fn category_service(
    conn: &Connection,
) -> Result<CategoryService<SqliteCategoryRepository<'_>>, ServiceError> {
    Ok(CategoryService::new(SqliteCategoryRepository::try_new(
        conn,
    )?))
}

fn note_service(conn: &Connection) -> Result<NoteService<SqliteNoteRepository<'_>>, ServiceError> {
    Ok(NoteService::new(SqliteNoteRepository::try_new(conn)?))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

/// Orders stored tasks to match the UI's list; unknown-to-UI tasks go last
/// in stored order.
fn arrange(mut tasks: Vec<Task>, order: &[Uuid]) -> Vec<Task> {
    tasks.sort_by_key(|task| {
        order
            .iter()
            .position(|id| *id == task.id)
            .unwrap_or(usize::MAX)
    });
    tasks
}

fn outcome_label(outcome: DragOutcome) -> &'static str {
    match outcome {
        DragOutcome::LaneChanged { .. } => "lane_changed",
        DragOutcome::Reordered { .. } => "reordered",
        DragOutcome::Unchanged => "unchanged",
    }
}

fn parse_id(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("{field} is not a valid id: `{value}`"))
}

fn parse_time_block(value: &str) -> Result<TimeBlock, String> {
    TimeBlock::parse(value.trim()).ok_or_else(|| {
        format!("unknown time block `{value}`; expected morning|afternoon|evening")
    })
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    Theme::parse(value.trim()).ok_or_else(|| format!("unknown theme `{value}`"))
}

fn to_task_item(task: &Task, categories: &[Category]) -> TaskItem {
    let display = resolve_display(categories, task.category_id);
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        category_id: task.category_id.to_string(),
        category_label: display.label.to_string(),
        category_icon: display.icon.to_string(),
        category_theme: display.theme.map(|theme| theme.as_str().to_string()),
        is_special_order: display.is_orphan,
        time_block: task.time_block.as_str().to_string(),
        status: task.status.as_str().to_string(),
        completed_at: task.completed_at,
        created_at: task.created_at,
    }
}

fn to_category_item(category: &Category) -> CategoryItem {
    CategoryItem {
        id: category.id.to_string(),
        label: category.label.clone(),
        icon: category.icon.clone(),
        theme: category.theme.as_str().to_string(),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        content: note.content.clone(),
        created_at: note.created_at,
        theme: note.theme.as_str().to_string(),
    }
}

fn to_tally_item(label: &str, tally: Tally) -> TallyItem {
    TallyItem {
        label: label.to_string(),
        total: to_u32(tally.total),
        completed: to_u32(tally.completed),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        board_load, category_create, category_delete, clear_all_data, core_version,
        export_data, history_load, import_data, import_preview, init_logging, note_create,
        note_list, ping, stats_load, task_create, task_edit, task_move, task_toggle,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn created_task_shows_on_board_and_toggles() {
        let category = category_create(unique_token("menu"), "☕".to_string(), "mocha".to_string());
        assert!(category.ok, "{}", category.message);
        let category_id = category.id.expect("category id");

        let title = unique_token("order");
        let created = task_create(title.clone(), category_id, "afternoon".to_string());
        assert!(created.ok, "{}", created.message);
        let task_id = created.id.expect("task id");

        let board = board_load();
        assert!(board.ok, "{}", board.message);
        let afternoon = board
            .lanes
            .iter()
            .find(|lane| lane.time_block == "afternoon")
            .expect("afternoon lane");
        let card = afternoon
            .tasks
            .iter()
            .find(|task| task.id == task_id)
            .expect("created task on board");
        assert_eq!(card.title, title);
        assert_eq!(card.status, "active");

        let toggled = task_toggle(task_id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        let board = board_load();
        let card = board
            .lanes
            .iter()
            .flat_map(|lane| lane.tasks.iter())
            .find(|task| task.id == task_id)
            .expect("same-day completion stays visible");
        assert_eq!(card.status, "completed");
        assert!(card.completed_at.is_some());
    }

    #[test]
    fn orphaned_task_renders_as_special_order() {
        let category = category_create(unique_token("gone"), "🍋".to_string(), "lemon".to_string());
        let category_id = category.id.expect("category id");
        let created = task_create(unique_token("orphan"), category_id.clone(), "evening".to_string());
        let task_id = created.id.expect("task id");
        assert!(category_delete(category_id).ok);

        let board = board_load();
        let card = board
            .lanes
            .iter()
            .flat_map(|lane| lane.tasks.iter())
            .find(|task| task.id == task_id)
            .expect("orphan still on board");
        assert!(card.is_special_order);
        assert_eq!(card.category_label, "Special Order");
    }

    #[test]
    fn task_move_to_lane_is_saved() {
        let category = category_create(unique_token("move"), "🍓".to_string(), "strawberry".to_string());
        let category_id = category.id.expect("category id");
        let task_id = task_create(unique_token("mover"), category_id, "morning".to_string())
            .id
            .expect("task id");

        let moved = task_move(
            vec![task_id.clone()],
            task_id.clone(),
            None,
            Some("evening".to_string()),
        );
        assert!(moved.ok, "{}", moved.message);
        assert_eq!(moved.outcome, "lane_changed");

        let board = board_load();
        let evening = board
            .lanes
            .iter()
            .find(|lane| lane.time_block == "evening")
            .expect("evening lane");
        assert!(evening.tasks.iter().any(|task| task.id == task_id));

        let missing_target = task_move(Vec::new(), task_id, None, None);
        assert!(!missing_target.ok);
    }

    #[test]
    fn invalid_inputs_fail_without_panicking() {
        assert!(!task_create("x".to_string(), "nope".to_string(), "morning".to_string()).ok);
        assert!(!task_edit("nope".to_string(), None, None, None).ok);
        assert!(!note_create("hi".to_string(), "espresso".to_string()).ok);
        assert!(!export_data("xml".to_string()).ok);
    }

    #[test]
    fn notes_history_stats_and_export_respond() {
        let content = unique_token("note");
        assert!(note_create(content.clone(), "latte".to_string()).ok);
        assert!(note_list().items.iter().any(|note| note.content == content));
        assert!(history_load().ok);
        assert!(stats_load().ok);

        let export = export_data("json".to_string());
        assert!(export.ok, "{}", export.message);
        assert!(export.file_name.ends_with(".json"));
        assert!(export.content.contains(&content));
    }

    #[test]
    fn import_requires_valid_payload_and_confirmation() {
        let invalid = import_preview("{\"tasks\": []}".to_string());
        assert!(!invalid.ok);
        assert_eq!(invalid.errors.len(), 2);

        let empty = r#"{"version":1,"categories":[],"tasks":[],"notes":[]}"#.to_string();
        let declined = import_data(empty, false);
        assert!(!declined.ok);
        assert!(declined.message.contains("confirmation"));

        let declined_clear = clear_all_data(false);
        assert!(!declined_clear.ok);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
