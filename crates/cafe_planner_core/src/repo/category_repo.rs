//! Category collection over the `categories` table.
//!
//! # Invariants
//! - `get_all` is ordered by menu `position ASC, id ASC`.
//! - New categories append to the end of the menu; upserts keep their slot.
//! - Deleting a category never touches `tasks`.

use crate::model::category::{Category, CategoryId};
use crate::model::theme::Theme;
use crate::repo::{
    ensure_connection_ready, parse_uuid, CollectionRepository, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLLECTION: &str = "categories";

const CATEGORY_SELECT_SQL: &str = "SELECT
    id,
    label,
    icon,
    theme
FROM categories";

/// SQLite-backed category collection.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            COLLECTION,
            &["id", "label", "icon", "theme", "position"],
        )?;
        Ok(Self { conn })
    }
}

impl CollectionRepository for SqliteCategoryRepository<'_> {
    type Item = Category;

    fn get_all(&self) -> RepoResult<Vec<Category>> {
        load_categories(self.conn)
    }

    fn get(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt
            .query_row([id.to_string()], RawCategory::from_row)
            .optional()?;
        raw.map(RawCategory::into_category).transpose()
    }

    fn put(&self, item: &Category) -> RepoResult<()> {
        item.validate()?;
        upsert_category(self.conn, item)
    }

    fn delete(&self, id: CategoryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: COLLECTION,
                id,
            });
        }
        Ok(())
    }

    fn bulk_seed(&self, items: &[Category]) -> RepoResult<()> {
        for item in items {
            item.validate()?;
        }
        let tx = self.conn.unchecked_transaction()?;
        for item in items {
            upsert_category(&tx, item)?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Loads every category in menu order.
pub(crate) fn load_categories(conn: &Connection) -> RepoResult<Vec<Category>> {
    let mut stmt = conn.prepare(&format!(
        "{CATEGORY_SELECT_SQL} ORDER BY position ASC, id ASC;"
    ))?;
    let raw_rows = stmt
        .query_map([], RawCategory::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    raw_rows
        .into_iter()
        .map(RawCategory::into_category)
        .collect()
}

pub(crate) fn upsert_category(conn: &Connection, category: &Category) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO categories (
            id,
            label,
            icon,
            theme,
            position
        ) VALUES (
            ?1, ?2, ?3, ?4,
            (SELECT COALESCE(MAX(position), -1) + 1 FROM categories)
        )
        ON CONFLICT(id) DO UPDATE SET
            label = excluded.label,
            icon = excluded.icon,
            theme = excluded.theme;",
        params![
            category.id.to_string(),
            category.label.as_str(),
            category.icon.as_str(),
            category.theme.as_str(),
        ],
    )?;
    Ok(())
}

struct RawCategory {
    id: String,
    label: String,
    icon: String,
    theme: String,
}

impl RawCategory {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            label: row.get("label")?,
            icon: row.get("icon")?,
            theme: row.get("theme")?,
        })
    }

    fn into_category(self) -> RepoResult<Category> {
        let theme = Theme::parse(&self.theme).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid theme `{}` in categories.theme", self.theme))
        })?;
        let category = Category {
            id: parse_uuid(&self.id, "categories.id")?,
            label: self.label,
            icon: self.icon,
            theme,
        };
        category.validate()?;
        Ok(category)
    }
}
