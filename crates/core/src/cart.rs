use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{cart::CartLineRequest, menu::MenuItemId};
use crate::ordering::pricing;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub entry_id: String,
    pub line: CartLineRequest,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

// Write surface of the cart. Lines enter through `add_line`; the quantity
// stepper drives `set_item_quantity` with absolute targets.
pub trait CartSink: Send + Sync {
    fn add_line(&self, request: CartLineRequest);
    fn set_item_quantity(&self, item_id: &MenuItemId, quantity: u32);
}

#[derive(Clone, Default)]
pub struct InMemoryCart {
    entries: Arc<Mutex<Vec<CartEntry>>>,
}

impl InMemoryCart {
    fn guard(&self) -> MutexGuard<'_, Vec<CartEntry>> {
        match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn lines(&self) -> Vec<CartEntry> {
        self.guard().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    // Units of this item across every customization.
    pub fn item_quantity(&self, item_id: &MenuItemId) -> u32 {
        self.guard()
            .iter()
            .filter(|entry| &entry.line.item.id == item_id)
            .map(|entry| entry.quantity)
            .sum()
    }

    pub fn increment_item(&self, item_id: &MenuItemId) -> u32 {
        let target = self.item_quantity(item_id).saturating_add(1);
        self.set_item_quantity(item_id, target);
        self.item_quantity(item_id)
    }

    // Floors at zero; stepping below removes the item entirely.
    pub fn decrement_item(&self, item_id: &MenuItemId) -> u32 {
        let target = self.item_quantity(item_id).saturating_sub(1);
        self.set_item_quantity(item_id, target);
        self.item_quantity(item_id)
    }

    // Units across the whole cart, the number the header badge shows.
    pub fn items_count(&self) -> u32 {
        self.guard().iter().map(|entry| entry.quantity).sum()
    }

    pub fn total(&self) -> Decimal {
        self.guard()
            .iter()
            .map(|entry| pricing::line_unit_price(&entry.line) * Decimal::from(entry.quantity))
            .sum()
    }
}

impl CartSink for InMemoryCart {
    // Identical customizations merge into one entry; distinct ones coexist.
    fn add_line(&self, request: CartLineRequest) {
        let key = request.customization_key();
        let mut entries = self.guard();

        if let Some(entry) =
            entries.iter_mut().find(|entry| entry.line.customization_key() == key)
        {
            entry.quantity += request.quantity;
            return;
        }

        entries.push(CartEntry {
            entry_id: Uuid::new_v4().to_string(),
            quantity: request.quantity,
            line: request,
            added_at: Utc::now(),
        });
    }

    // Absolute target for an item across all of its customizations. Zero
    // clears them; a positive target collapses onto the most recently added
    // entry. Unknown items are left alone, lines enter via `add_line`.
    fn set_item_quantity(&self, item_id: &MenuItemId, quantity: u32) {
        let mut entries = self.guard();

        if quantity == 0 {
            entries.retain(|entry| &entry.line.item.id != item_id);
            return;
        }

        let Some(last_index) = entries.iter().rposition(|entry| &entry.line.item.id == item_id)
        else {
            return;
        };

        let keep_id = entries[last_index].entry_id.clone();
        entries.retain(|entry| &entry.line.item.id != item_id || entry.entry_id == keep_id);
        if let Some(entry) = entries.iter_mut().find(|entry| entry.entry_id == keep_id) {
            entry.quantity = quantity;
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::cart::{CartSink, InMemoryCart};
    use crate::domain::{
        cart::CartLineRequest,
        menu::{AddOn, AddOnId, MenuItem, MenuItemId},
    };

    fn item(id: &str, base: i64) -> MenuItem {
        MenuItem {
            id: MenuItemId(id.to_owned()),
            name: id.to_owned(),
            description: String::new(),
            base_price: Decimal::new(base, 0),
            discount_price: None,
            effective_price: None,
            available: true,
            popular: false,
            is_on_discount: false,
            image: None,
            category: None,
            variations: Vec::new(),
            add_ons: Vec::new(),
        }
    }

    fn add_on(id: &str, price: i64) -> AddOn {
        AddOn {
            id: AddOnId(id.to_owned()),
            name: id.to_owned(),
            category: "sides".to_owned(),
            price: Decimal::new(price, 0),
        }
    }

    #[test]
    fn identical_customizations_merge_into_one_entry() {
        let cart = InMemoryCart::default();

        cart.add_line(CartLineRequest::bare(item("iced-tea", 45)));
        cart.add_line(CartLineRequest::bare(item("iced-tea", 45)));

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn distinct_customizations_stay_separate() {
        let cart = InMemoryCart::default();

        cart.add_line(CartLineRequest::bare(item("fried-chicken", 100)));
        let mut with_rice = CartLineRequest::bare(item("fried-chicken", 100));
        with_rice.add_ons.push(add_on("extra-rice", 15));
        cart.add_line(with_rice);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_quantity(&MenuItemId("fried-chicken".to_owned())), 2);
    }

    #[test]
    fn setting_quantity_to_zero_clears_every_entry_for_the_item() {
        let cart = InMemoryCart::default();
        let chicken = MenuItemId("fried-chicken".to_owned());

        cart.add_line(CartLineRequest::bare(item("fried-chicken", 100)));
        let mut with_rice = CartLineRequest::bare(item("fried-chicken", 100));
        with_rice.add_ons.push(add_on("extra-rice", 15));
        cart.add_line(with_rice);
        cart.add_line(CartLineRequest::bare(item("iced-tea", 45)));

        cart.set_item_quantity(&chicken, 0);

        assert_eq!(cart.item_quantity(&chicken), 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_quantity(&MenuItemId("iced-tea".to_owned())), 1);
    }

    #[test]
    fn setting_a_positive_quantity_collapses_onto_the_latest_entry() {
        let cart = InMemoryCart::default();
        let chicken = MenuItemId("fried-chicken".to_owned());

        cart.add_line(CartLineRequest::bare(item("fried-chicken", 100)));
        let mut with_rice = CartLineRequest::bare(item("fried-chicken", 100));
        with_rice.add_ons.push(add_on("extra-rice", 15));
        cart.add_line(with_rice);

        cart.set_item_quantity(&chicken, 5);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[0].line.add_ons.len(), 1);
    }

    #[test]
    fn setting_quantity_for_an_absent_item_is_a_no_op() {
        let cart = InMemoryCart::default();

        cart.set_item_quantity(&MenuItemId("phantom".to_owned()), 3);

        assert!(cart.is_empty());
    }

    #[test]
    fn stepper_walks_the_aggregate_quantity() {
        let cart = InMemoryCart::default();
        let tea = MenuItemId("iced-tea".to_owned());

        cart.add_line(CartLineRequest::bare(item("iced-tea", 45)));

        assert_eq!(cart.increment_item(&tea), 2);
        assert_eq!(cart.decrement_item(&tea), 1);
        assert_eq!(cart.decrement_item(&tea), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.decrement_item(&tea), 0);
    }

    #[test]
    fn totals_weight_unit_price_by_quantity() {
        let cart = InMemoryCart::default();

        let mut with_rice = CartLineRequest::bare(item("fried-chicken", 100));
        with_rice.add_ons.push(add_on("extra-rice", 15));
        cart.add_line(with_rice.clone());
        cart.add_line(with_rice);
        cart.add_line(CartLineRequest::bare(item("iced-tea", 45)));

        assert_eq!(cart.items_count(), 3);
        assert_eq!(cart.total(), Decimal::new(275, 0));
    }

    #[test]
    fn clearing_the_cart_empties_it() {
        let cart = InMemoryCart::default();
        cart.add_line(CartLineRequest::bare(item("iced-tea", 45)));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.items_count(), 0);
    }
}
