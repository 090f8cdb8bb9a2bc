//! Whole-store use-cases: backup, restore, reset and dashboard numbers.
//!
//! # Invariants
//! - Import validates the full payload before asking for confirmation, and
//!   writes nothing unless confirmed.
//! - Clearing all data requires confirmation.

use crate::board::stats::{compute, PlannerStats};
use crate::repo::store::{load_snapshot, replace_all, reset_store, StoreSnapshot};
use crate::service::{Confirmation, ServiceError, ServiceResult};
use crate::transfer::{export_csv, export_json, validate_import};
use log::{error, info, warn};
use rusqlite::Connection;

/// Counts shown in the import confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub categories: usize,
    pub tasks: usize,
    pub notes: usize,
}

impl From<&StoreSnapshot> for ImportSummary {
    fn from(snapshot: &StoreSnapshot) -> Self {
        Self {
            categories: snapshot.categories.len(),
            tasks: snapshot.tasks.len(),
            notes: snapshot.notes.len(),
        }
    }
}

pub struct DataService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> DataService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    pub fn snapshot(&self) -> ServiceResult<StoreSnapshot> {
        Ok(load_snapshot(self.conn)?)
    }

    /// Full JSON backup stamped with `now_ms`.
    pub fn export_json(&self, now_ms: i64) -> ServiceResult<String> {
        let snapshot = self.snapshot()?;
        let json = export_json(&snapshot, now_ms)?;
        info!(
            "event=export module=service status=ok format=json tasks={}",
            snapshot.tasks.len()
        );
        Ok(json)
    }

    /// Flat task table.
    pub fn export_csv(&self) -> ServiceResult<String> {
        let snapshot = self.snapshot()?;
        let csv = export_csv(&snapshot)?;
        info!(
            "event=export module=service status=ok format=csv tasks={}",
            snapshot.tasks.len()
        );
        Ok(csv)
    }

    /// Validates a backup without touching storage.
    pub fn preview_import(&self, text: &str) -> ServiceResult<ImportSummary> {
        let snapshot = validate_import(text).map_err(|err| {
            warn!(
                "event=import_validate module=service status=error problems={}",
                err.errors.len()
            );
            err
        })?;
        Ok(ImportSummary::from(&snapshot))
    }

    /// Replaces every collection with the backup's contents.
    pub fn import_json(
        &mut self,
        text: &str,
        confirmation: Confirmation,
    ) -> ServiceResult<ImportSummary> {
        let snapshot = validate_import(text).map_err(|err| {
            warn!(
                "event=import_validate module=service status=error problems={}",
                err.errors.len()
            );
            err
        })?;
        if confirmation == Confirmation::Declined {
            info!("event=import module=service status=declined");
            return Err(ServiceError::ConfirmationRequired("import overwrite"));
        }

        replace_all(self.conn, &snapshot).map_err(|err| {
            error!("event=import module=service status=error error={err}");
            err
        })?;
        let summary = ImportSummary::from(&snapshot);
        info!(
            "event=import module=service status=ok categories={} tasks={} notes={}",
            summary.categories, summary.tasks, summary.notes
        );
        Ok(summary)
    }

    /// Deletes every category, task and note.
    pub fn clear_all_data(&mut self, confirmation: Confirmation) -> ServiceResult<()> {
        if confirmation == Confirmation::Declined {
            info!("event=clear_all module=service status=declined");
            return Err(ServiceError::ConfirmationRequired("clear all data"));
        }
        reset_store(self.conn).map_err(|err| {
            error!("event=clear_all module=service status=error error={err}");
            err
        })?;
        info!("event=clear_all module=service status=ok");
        Ok(())
    }

    /// Dashboard numbers as of `now_ms`.
    pub fn statistics(&self, now_ms: i64) -> ServiceResult<PlannerStats> {
        let snapshot = self.snapshot()?;
        Ok(compute(&snapshot.tasks, &snapshot.categories, now_ms))
    }
}
