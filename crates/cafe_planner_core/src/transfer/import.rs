//! JSON backup validation.
//!
//! Validation is exhaustive: every structural problem, malformed item,
//! duplicate id and dangling `categoryId` is reported, not only the first.

use super::{ImportError, EXPORT_SCHEMA_VERSION};
use crate::model::category::Category;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::model::ModelValidationError;
use crate::repo::store::StoreSnapshot;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use uuid::Uuid;

/// Parses and validates a JSON backup.
///
/// Returns the decoded store contents, or every problem found.
pub fn validate_import(text: &str) -> Result<StoreSnapshot, ImportError> {
    let root: Value = serde_json::from_str(text).map_err(|err| ImportError {
        errors: vec![format!("file is not valid JSON: {err}")],
    })?;
    let Some(object) = root.as_object() else {
        return Err(ImportError {
            errors: vec!["backup must be a JSON object".to_string()],
        });
    };

    let mut errors = Vec::new();
    check_version(object, &mut errors);

    // Ids of categories that failed to decode; already reported once.
    let mut unreadable_categories = HashSet::new();
    let categories = decode_collection::<Category>(
        object,
        "categories",
        &mut errors,
        &mut unreadable_categories,
        |item| (item.id, item.validate()),
    );
    let tasks = decode_collection::<Task>(object, "tasks", &mut errors, &mut HashSet::new(), |item| {
        (item.id, item.validate())
    });
    let notes = decode_collection::<Note>(object, "notes", &mut errors, &mut HashSet::new(), |item| {
        (item.id, item.validate())
    });

    if let (Some(categories), Some(tasks)) = (categories.as_ref(), tasks.as_ref()) {
        let known = categories
            .iter()
            .map(|category| category.id)
            .collect::<HashSet<_>>();
        for (index, task) in tasks.iter().enumerate() {
            if !known.contains(&task.category_id)
                && !unreadable_categories.contains(&task.category_id)
            {
                errors.push(format!(
                    "tasks[{index}] \"{}\": categoryId {} does not match any imported category",
                    task.title, task.category_id
                ));
            }
        }
    }

    match (categories, tasks, notes) {
        (Some(categories), Some(tasks), Some(notes)) if errors.is_empty() => Ok(StoreSnapshot {
            categories,
            tasks,
            notes,
        }),
        _ => Err(ImportError { errors }),
    }
}

fn check_version(object: &Map<String, Value>, errors: &mut Vec<String>) {
    let Some(version) = object.get("version") else {
        return;
    };
    match version.as_u64() {
        Some(value) if value <= u64::from(EXPORT_SCHEMA_VERSION) => {}
        Some(value) => errors.push(format!(
            "backup version {value} is newer than supported {EXPORT_SCHEMA_VERSION}"
        )),
        None => errors.push("`version` must be a non-negative integer".to_string()),
    }
}

/// Decodes one collection, pushing structural, per-item and duplicate-id
/// errors. Returns `None` only when the collection itself is unusable.
///
/// Items that fail to decode but still carry a readable `id` land in
/// `unreadable_ids`.
fn decode_collection<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<String>,
    unreadable_ids: &mut HashSet<Uuid>,
    check: impl Fn(&T) -> (Uuid, Result<(), ModelValidationError>),
) -> Option<Vec<T>> {
    let items = match object.get(key) {
        None => {
            errors.push(format!("`{key}` is missing"));
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(format!("`{key}` must be an array"));
            return None;
        }
    };

    let mut decoded = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let value = match T::deserialize(item) {
            Ok(value) => value,
            Err(err) => {
                errors.push(format!("{key}[{index}]: {err}"));
                if let Some(id) = item
                    .get("id")
                    .and_then(Value::as_str)
                    .and_then(|raw| Uuid::parse_str(raw).ok())
                {
                    unreadable_ids.insert(id);
                }
                continue;
            }
        };
        let (id, validity) = check(&value);
        if let Err(err) = validity {
            errors.push(format!("{key}[{index}]: {err}"));
        }
        if !seen.insert(id) {
            errors.push(format!("{key}[{index}]: duplicate id {id}"));
        }
        decoded.push(value);
    }
    Some(decoded)
}
