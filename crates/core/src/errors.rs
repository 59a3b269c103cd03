use thiserror::Error;

use crate::domain::menu::{AddOnId, MenuItemId, VariationId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("item {item} has no variation {variation}")]
    UnknownVariation { item: MenuItemId, variation: VariationId },
    #[error("item {item} has no add-on {add_on}")]
    UnknownAddOn { item: MenuItemId, add_on: AddOnId },
    #[error("item {0} is not available for ordering")]
    ItemUnavailable(MenuItemId),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}
