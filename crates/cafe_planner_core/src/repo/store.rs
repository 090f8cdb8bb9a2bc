//! Whole-store operations spanning all three collections.
//!
//! # Invariants
//! - `reset_store` and `replace_all` are all-or-nothing.
//! - `replace_all` keeps the supplied category order as the new menu order.

use crate::model::category::Category;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::repo::category_repo::{load_categories, upsert_category};
use crate::repo::note_repo::{load_notes, upsert_note};
use crate::repo::task_repo::{load_tasks, upsert_task};
use crate::repo::RepoResult;
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Full copy of the planner store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub categories: Vec<Category>,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
}

/// Reads every collection in its stable `get_all` order.
pub fn load_snapshot(conn: &Connection) -> RepoResult<StoreSnapshot> {
    Ok(StoreSnapshot {
        categories: load_categories(conn)?,
        tasks: load_tasks(conn)?,
        notes: load_notes(conn)?,
    })
}

/// Deletes every row from every collection.
pub fn reset_store(conn: &mut Connection) -> RepoResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    clear_collections(&tx)?;
    tx.commit()?;
    info!("event=store_reset module=repo status=ok");
    Ok(())
}

/// Replaces the whole store with `snapshot` in one transaction.
///
/// Every record is validated before the first delete runs.
pub fn replace_all(conn: &mut Connection, snapshot: &StoreSnapshot) -> RepoResult<()> {
    for category in &snapshot.categories {
        category.validate()?;
    }
    for task in &snapshot.tasks {
        task.validate()?;
    }
    for note in &snapshot.notes {
        note.validate()?;
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    clear_collections(&tx)?;
    for category in &snapshot.categories {
        upsert_category(&tx, category)?;
    }
    for task in &snapshot.tasks {
        upsert_task(&tx, task)?;
    }
    for note in &snapshot.notes {
        upsert_note(&tx, note)?;
    }
    tx.commit()?;

    info!(
        "event=store_replace module=repo status=ok categories={} tasks={} notes={}",
        snapshot.categories.len(),
        snapshot.tasks.len(),
        snapshot.notes.len()
    );
    Ok(())
}

fn clear_collections(conn: &Connection) -> RepoResult<()> {
    conn.execute_batch(
        "DELETE FROM tasks;
         DELETE FROM notes;
         DELETE FROM categories;",
    )?;
    Ok(())
}
