//! Task collection over the `tasks` table.
//!
//! # Invariants
//! - `get_all` is ordered by `created_at ASC, id ASC`.
//! - `category_id` is stored as-is; dangling references are allowed.

use crate::model::task::{Task, TaskId, TaskStatus, TimeBlock};
use crate::repo::{
    ensure_connection_ready, parse_uuid, CollectionRepository, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLLECTION: &str = "tasks";

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    category_id,
    time_block,
    status,
    completed_at,
    created_at
FROM tasks";

/// SQLite-backed task collection.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            COLLECTION,
            &[
                "id",
                "title",
                "category_id",
                "time_block",
                "status",
                "completed_at",
                "created_at",
            ],
        )?;
        Ok(Self { conn })
    }
}

impl CollectionRepository for SqliteTaskRepository<'_> {
    type Item = Task;

    fn get_all(&self) -> RepoResult<Vec<Task>> {
        load_tasks(self.conn)
    }

    fn get(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt
            .query_row([id.to_string()], RawTask::from_row)
            .optional()?;
        raw.map(RawTask::into_task).transpose()
    }

    fn put(&self, item: &Task) -> RepoResult<()> {
        item.validate()?;
        upsert_task(self.conn, item)
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: COLLECTION,
                id,
            });
        }
        Ok(())
    }

    fn bulk_seed(&self, items: &[Task]) -> RepoResult<()> {
        for item in items {
            item.validate()?;
        }
        let tx = self.conn.unchecked_transaction()?;
        for item in items {
            upsert_task(&tx, item)?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Loads every task in stable order.
pub(crate) fn load_tasks(conn: &Connection) -> RepoResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "{TASK_SELECT_SQL} ORDER BY created_at ASC, id ASC;"
    ))?;
    let raw_rows = stmt
        .query_map([], RawTask::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    raw_rows.into_iter().map(RawTask::into_task).collect()
}

pub(crate) fn upsert_task(conn: &Connection, task: &Task) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO tasks (
            id,
            title,
            category_id,
            time_block,
            status,
            completed_at,
            created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            category_id = excluded.category_id,
            time_block = excluded.time_block,
            status = excluded.status,
            completed_at = excluded.completed_at,
            created_at = excluded.created_at;",
        params![
            task.id.to_string(),
            task.title.as_str(),
            task.category_id.to_string(),
            task.time_block.as_str(),
            task.status.as_str(),
            task.completed_at,
            task.created_at,
        ],
    )?;
    Ok(())
}

/// Untyped row image; conversion happens outside the rusqlite closure so
/// domain errors are not squeezed through `rusqlite::Error`.
struct RawTask {
    id: String,
    title: String,
    category_id: String,
    time_block: String,
    status: String,
    completed_at: Option<i64>,
    created_at: i64,
}

impl RawTask {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            category_id: row.get("category_id")?,
            time_block: row.get("time_block")?,
            status: row.get("status")?,
            completed_at: row.get("completed_at")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_task(self) -> RepoResult<Task> {
        let time_block = TimeBlock::parse(&self.time_block).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid time block `{}` in tasks.time_block",
                self.time_block
            ))
        })?;
        let status = TaskStatus::parse(&self.status).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid status `{}` in tasks.status", self.status))
        })?;

        let task = Task {
            id: parse_uuid(&self.id, "tasks.id")?,
            title: self.title,
            category_id: parse_uuid(&self.category_id, "tasks.category_id")?,
            time_block,
            status,
            completed_at: self.completed_at,
            created_at: self.created_at,
        };
        task.validate()?;
        Ok(task)
    }
}
