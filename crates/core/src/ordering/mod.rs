pub mod catalog;
pub mod pricing;
pub mod session;
pub mod validate;

pub use catalog::{Catalog, CatalogDocument, CatalogError, CategoryFilter};
pub use pricing::{
    discount_percent, line_total, line_unit_price, price_selection, selection_breakdown,
    PriceBreakdown,
};
pub use session::{AddFlow, CustomizationSession};
pub use validate::{validate_catalog, MenuViolation, ValidationReport};
