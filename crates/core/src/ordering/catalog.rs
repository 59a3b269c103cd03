use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    category::{Category, CategoryId},
    menu::{MenuItem, MenuItemId},
};

// On-disk menu shape. Categories and items are both optional sections so a
// bare `{"items": [...]}` file is a valid menu.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read menu file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse menu file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("could not parse menu document: {0}")]
    ParseDocument(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, items: Vec<MenuItem>) -> Self {
        Self { categories, items }
    }

    pub fn from_document(document: CatalogDocument) -> Self {
        Self::new(document.categories, document.items)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document = serde_json::from_str::<CatalogDocument>(raw)?;
        Ok(Self::from_document(document))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;

        let document = serde_json::from_str::<CatalogDocument>(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;

        Ok(Self::from_document(document))
    }

    pub fn find(&self, item_id: &MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == item_id)
    }

    pub fn category(&self, category_id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == category_id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn items_in(&self, filter: &CategoryFilter) -> Vec<&MenuItem> {
        match filter {
            CategoryFilter::All => self.items.iter().collect(),
            CategoryFilter::Only(category_id) => self
                .items
                .iter()
                .filter(|item| item.category.as_ref() == Some(category_id))
                .collect(),
        }
    }

    pub fn popular(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| item.popular).collect()
    }
}
