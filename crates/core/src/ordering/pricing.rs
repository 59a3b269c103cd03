use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{
    cart::CartLineRequest,
    menu::{AddOn, MenuItem, Variation},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base: Decimal,
    pub variation_delta: Decimal,
    pub add_ons_total: Decimal,
    pub total: Decimal,
}

pub fn price_selection(
    item: &MenuItem,
    variation: Option<&Variation>,
    add_ons: &[(&AddOn, u32)],
) -> Decimal {
    selection_breakdown(item, variation, add_ons).total
}

pub fn selection_breakdown(
    item: &MenuItem,
    variation: Option<&Variation>,
    add_ons: &[(&AddOn, u32)],
) -> PriceBreakdown {
    let base = item.effective_base();
    let variation_delta = variation.map(|variation| variation.price).unwrap_or(Decimal::ZERO);
    let add_ons_total: Decimal =
        add_ons.iter().map(|(add_on, quantity)| add_on.price * Decimal::from(*quantity)).sum();
    let total = base + variation_delta + add_ons_total;

    PriceBreakdown { base, variation_delta, add_ons_total, total }
}

pub fn line_unit_price(request: &CartLineRequest) -> Decimal {
    request.unit_price()
}

pub fn line_total(request: &CartLineRequest) -> Decimal {
    line_unit_price(request) * Decimal::from(request.quantity)
}

// Whole-percent discount, rounded half away from zero. A non-positive base
// yields 0 rather than dividing by it.
pub fn discount_percent(base_price: Decimal, discount_price: Decimal) -> u32 {
    if base_price <= Decimal::ZERO {
        return 0;
    }

    ((base_price - discount_price) / base_price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::menu::{AddOn, AddOnId, MenuItem, MenuItemId, Variation, VariationId};

    use super::{discount_percent, price_selection, selection_breakdown};

    fn item(base: i64) -> MenuItem {
        MenuItem {
            id: MenuItemId("burger-steak".to_owned()),
            name: "Burger Steak".to_owned(),
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

    fn variation(price: i64) -> Variation {
        Variation {
            id: VariationId("large".to_owned()),
            name: "Large".to_owned(),
            price: Decimal::new(price, 0),
        }
    }

    fn add_on(price: i64) -> AddOn {
        AddOn {
            id: AddOnId("extra-rice".to_owned()),
            name: "Extra Rice".to_owned(),
            category: "sides".to_owned(),
            price: Decimal::new(price, 0),
        }
    }

    #[test]
    fn breakdown_sums_base_variation_and_add_ons() {
        let item = item(100);
        let variation = variation(20);
        let add_on = add_on(15);

        let breakdown = selection_breakdown(&item, Some(&variation), &[(&add_on, 2)]);

        assert_eq!(breakdown.base, Decimal::new(100, 0));
        assert_eq!(breakdown.variation_delta, Decimal::new(20, 0));
        assert_eq!(breakdown.add_ons_total, Decimal::new(30, 0));
        assert_eq!(breakdown.total, Decimal::new(150, 0));
    }

    #[test]
    fn effective_price_overrides_base_in_selection_total() {
        let mut item = item(100);
        item.effective_price = Some(Decimal::new(80, 0));

        assert_eq!(price_selection(&item, None, &[]), Decimal::new(80, 0));
    }

    #[test]
    fn discount_percent_rounds_to_whole_number() {
        assert_eq!(discount_percent(Decimal::new(150, 0), Decimal::new(120, 0)), 20);
        assert_eq!(discount_percent(Decimal::new(199, 0), Decimal::new(150, 0)), 25);
    }

    #[test]
    fn discount_percent_on_zero_base_is_zero() {
        assert_eq!(discount_percent(Decimal::ZERO, Decimal::new(50, 0)), 0);
    }

    #[test]
    fn discount_percent_clamps_markup_to_zero() {
        assert_eq!(discount_percent(Decimal::new(100, 0), Decimal::new(120, 0)), 0);
    }
}
