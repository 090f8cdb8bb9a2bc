//! Category use-case service.
//!
//! # Invariants
//! - Labels are whitespace-normalized and must not be blank.
//! - Deleting a category leaves its tasks untouched.
//! - Default menu is seeded only into an empty collection.

use crate::model::category::{default_categories, Category, CategoryId};
use crate::model::normalize_text;
use crate::model::theme::Theme;
use crate::repo::CollectionRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;

const COLLECTION: &str = "categories";

pub struct CategoryService<R: CollectionRepository<Item = Category>> {
    repo: R,
}

impl<R: CollectionRepository<Item = Category>> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a category to the menu.
    pub fn create_category(&self, label: &str, icon: &str, theme: Theme) -> ServiceResult<Category> {
        let category = Category::new(normalize_text(label), icon.trim(), theme);
        self.repo.put(&category)?;
        info!(
            "event=category_create module=service status=ok theme={}",
            theme.as_str()
        );
        Ok(category)
    }

    /// Replaces label, icon and theme of an existing category.
    pub fn update_category(&self, category: &Category) -> ServiceResult<Category> {
        if self.repo.get(category.id)?.is_none() {
            return Err(ServiceError::NotFound {
                collection: COLLECTION,
                id: category.id,
            });
        }
        let updated = Category::with_id(
            category.id,
            normalize_text(&category.label),
            category.icon.trim(),
            category.theme,
        );
        self.repo.put(&updated)?;
        info!("event=category_update module=service status=ok");
        Ok(updated)
    }

    /// Removes a category. Its tasks become "Special Order" tickets.
    pub fn delete_category(&self, id: CategoryId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=category_delete module=service status=ok");
        Ok(())
    }

    pub fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.repo.get_all()?)
    }

    /// Seeds the default café menu when no categories exist yet.
    ///
    /// Returns the number of categories seeded.
    pub fn ensure_default_categories(&self) -> ServiceResult<usize> {
        if !self.repo.get_all()?.is_empty() {
            return Ok(0);
        }
        let defaults = default_categories();
        self.repo.bulk_seed(&defaults)?;
        info!(
            "event=category_seed module=service status=ok count={}",
            defaults.len()
        );
        Ok(defaults.len())
    }
}
