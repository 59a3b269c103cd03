pub mod cart;
pub mod category;
pub mod menu;

pub use cart::CartLineRequest;
pub use category::{Category, CategoryId};
pub use menu::{AddOn, AddOnId, MenuItem, MenuItemId, Variation, VariationId};
