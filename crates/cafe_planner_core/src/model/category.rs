//! Category model.
//!
//! # Invariants
//! - `label` is non-blank after trim.
//! - Deleting a category never touches tasks that reference it.

use crate::model::theme::Theme;
use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = Uuid;

/// Display label used for tasks whose category no longer exists.
pub const SPECIAL_ORDER_LABEL: &str = "Special Order";
/// Display glyph used for tasks whose category no longer exists.
pub const SPECIAL_ORDER_ICON: &str = "✨";

/// Menu section a task is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    /// Display glyph, typically one emoji.
    pub icon: String,
    pub theme: Theme,
}

impl Category {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, theme: Theme) -> Self {
        Self::with_id(Uuid::new_v4(), label, icon, theme)
    }

    /// Creates a category with a caller-provided id (seed/import paths).
    pub fn with_id(
        id: CategoryId,
        label: impl Into<String>,
        icon: impl Into<String>,
        theme: Theme,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            icon: icon.into(),
            theme,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.label.trim().is_empty() {
            return Err(ModelValidationError::BlankField("label"));
        }
        Ok(())
    }
}

/// Resolved presentation for a task's category, falling back to
/// "Special Order" when the referenced category is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDisplay<'a> {
    pub label: &'a str,
    pub icon: &'a str,
    pub theme: Option<Theme>,
    pub is_orphan: bool,
}

/// Looks up `category_id` in `categories`, falling back to "Special Order".
pub fn resolve_display(categories: &[Category], category_id: CategoryId) -> CategoryDisplay<'_> {
    match categories.iter().find(|category| category.id == category_id) {
        Some(category) => CategoryDisplay {
            label: category.label.as_str(),
            icon: category.icon.as_str(),
            theme: Some(category.theme),
            is_orphan: false,
        },
        None => CategoryDisplay {
            label: SPECIAL_ORDER_LABEL,
            icon: SPECIAL_ORDER_ICON,
            theme: None,
            is_orphan: true,
        },
    }
}

/// Default café menu seeded into an empty store.
pub fn default_categories() -> Vec<Category> {
    [
        ("Espresso Work", "☕", Theme::Mocha),
        ("Matcha Study", "🍵", Theme::Matcha),
        ("Berry Errands", "🍓", Theme::Strawberry),
        ("Caramel Chores", "🍮", Theme::Caramel),
        ("Lemon Wellness", "🍋", Theme::Lemon),
    ]
    .into_iter()
    .map(|(label, icon, theme)| Category::new(label, icon, theme))
    .collect()
}
