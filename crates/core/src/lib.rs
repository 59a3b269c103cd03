pub mod cart;
pub mod config;
pub mod display;
pub mod domain;
pub mod errors;
pub mod ordering;

pub use cart::{CartEntry, CartSink, InMemoryCart};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::cart::CartLineRequest;
pub use domain::category::{Category, CategoryId};
pub use domain::menu::{AddOn, AddOnId, MenuItem, MenuItemId, Variation, VariationId};
pub use errors::{ApplicationError, DomainError};
pub use ordering::catalog::{Catalog, CatalogDocument, CatalogError, CategoryFilter};
pub use ordering::pricing::PriceBreakdown;
pub use ordering::session::{AddFlow, CustomizationSession};
pub use ordering::validate::{validate_catalog, MenuViolation, ValidationReport};
