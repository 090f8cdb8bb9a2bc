//! Core domain logic for Cafe Planner.
//! This crate is the single source of truth for board rules and storage.

pub mod board;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod time;
pub mod transfer;

pub use board::drag::{DragError, DragOutcome, DropTarget};
pub use board::history::HistoryDay;
pub use board::lanes::{Board, Lane};
pub use board::stats::{CategoryStats, PlannerStats, Tally, TimeBlockStats};
pub use board::visibility::is_visible_on_board;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, SPECIAL_ORDER_LABEL};
pub use model::note::{Note, NoteId};
pub use model::task::{Task, TaskEdit, TaskId, TaskStatus, TimeBlock};
pub use model::theme::Theme;
pub use model::ModelValidationError;
pub use repo::category_repo::SqliteCategoryRepository;
pub use repo::note_repo::SqliteNoteRepository;
pub use repo::store::StoreSnapshot;
pub use repo::task_repo::SqliteTaskRepository;
pub use repo::{CollectionRepository, RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::data_service::{DataService, ImportSummary};
pub use service::note_service::NoteService;
pub use service::task_service::TaskService;
pub use service::{Confirmation, ServiceError, ServiceResult};
pub use transfer::{ExportBundle, ExportFormat, ImportError, TransferError, EXPORT_SCHEMA_VERSION};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
