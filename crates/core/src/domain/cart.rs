use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::menu::{AddOn, MenuItem, Variation};

// One confirmed customization, ready for the cart store. `quantity` is always
// 1 when emitted by a session; scaling happens in the cart, never here. An
// add-on chosen at quantity n appears as n repeated plain copies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub item: MenuItem,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<Variation>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

impl CartLineRequest {
    // The no-customization path: quantity 1, no variation, no add-ons.
    pub fn bare(item: MenuItem) -> Self {
        Self { item, quantity: 1, variation: None, add_ons: Vec::new() }
    }

    // Flattened lines carry each chosen add-on as a repeated copy, so summing
    // the plain prices recovers the quantity-weighted total.
    pub fn unit_price(&self) -> Decimal {
        let variation_delta =
            self.variation.as_ref().map(|variation| variation.price).unwrap_or(Decimal::ZERO);
        let add_ons_total: Decimal = self.add_ons.iter().map(|add_on| add_on.price).sum();

        self.item.effective_base() + variation_delta + add_ons_total
    }

    // Canonical identity of this line's configuration. Two requests with the
    // same item, variation and add-on multiset share a key regardless of the
    // order the add-ons were picked in.
    pub fn customization_key(&self) -> String {
        let mut add_on_ids: Vec<&str> =
            self.add_ons.iter().map(|add_on| add_on.id.0.as_str()).collect();
        add_on_ids.sort_unstable();

        let variation_id =
            self.variation.as_ref().map(|variation| variation.id.0.as_str()).unwrap_or_default();

        format!("{}|{}|{}", self.item.id.0, variation_id, add_on_ids.join(","))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::menu::{AddOn, AddOnId, MenuItem, MenuItemId, Variation, VariationId};

    use super::CartLineRequest;

    fn item() -> MenuItem {
        MenuItem {
            id: MenuItemId("fried-chicken".to_string()),
            name: "Fried Chicken".to_string(),
            description: String::new(),
            base_price: Decimal::new(150, 0),
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

    fn add_on(id: &str) -> AddOn {
        AddOn {
            id: AddOnId(id.to_string()),
            name: id.to_string(),
            category: "sides".to_string(),
            price: Decimal::new(15, 0),
        }
    }

    #[test]
    fn bare_request_has_no_customization() {
        let request = CartLineRequest::bare(item());
        assert_eq!(request.quantity, 1);
        assert_eq!(request.variation, None);
        assert!(request.add_ons.is_empty());
    }

    #[test]
    fn customization_key_ignores_add_on_pick_order() {
        let mut first = CartLineRequest::bare(item());
        first.add_ons = vec![add_on("gravy"), add_on("extra-rice")];

        let mut second = CartLineRequest::bare(item());
        second.add_ons = vec![add_on("extra-rice"), add_on("gravy")];

        assert_eq!(first.customization_key(), second.customization_key());
    }

    #[test]
    fn unit_price_sums_base_variation_and_flattened_add_ons() {
        let mut request = CartLineRequest::bare(item());
        request.variation = Some(Variation {
            id: VariationId("large".to_string()),
            name: "Large".to_string(),
            price: Decimal::new(20, 0),
        });
        request.add_ons = vec![add_on("extra-rice"), add_on("extra-rice")];

        assert_eq!(request.unit_price(), Decimal::new(200, 0));
    }

    #[test]
    fn customization_key_distinguishes_variations() {
        let plain = CartLineRequest::bare(item());

        let mut sized = CartLineRequest::bare(item());
        sized.variation = Some(Variation {
            id: VariationId("large".to_string()),
            name: "Large".to_string(),
            price: Decimal::new(20, 0),
        });

        assert_ne!(plain.customization_key(), sized.customization_key());
    }
}
