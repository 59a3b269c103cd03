use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::menu::{AddOn, MenuItem, Variation};
use crate::ordering::catalog::{Catalog, CategoryFilter};
use crate::ordering::pricing;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardBadge {
    Sale,
    Popular,
}

// The card's single action slot: one button state or the quantity stepper
// once the item is in the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddAction {
    Unavailable,
    AddToCart,
    CustomizeAndAdd,
    Stepper(u32),
}

impl AddAction {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Unavailable => Some("UNAVAILABLE"),
            Self::AddToCart => Some("ADD TO CART"),
            Self::CustomizeAndAdd => Some("CUSTOMIZE + ADD"),
            Self::Stepper(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTag {
    pub amount: String,
    pub original: Option<String>,
    pub starts_at: bool,
}

pub fn badges(item: &MenuItem) -> Vec<CardBadge> {
    let mut badges = Vec::new();
    if item.active_discount().is_some() {
        badges.push(CardBadge::Sale);
    }
    if item.popular {
        badges.push(CardBadge::Popular);
    }
    badges
}

pub fn discount_badge(item: &MenuItem) -> Option<String> {
    item.active_discount().map(|discount_price| {
        format!("{}% OFF", pricing::discount_percent(item.base_price, discount_price))
    })
}

pub fn add_action(item: &MenuItem, in_cart: u32) -> AddAction {
    if !item.available {
        AddAction::Unavailable
    } else if in_cart > 0 {
        AddAction::Stepper(in_cart)
    } else if item.requires_customization() {
        AddAction::CustomizeAndAdd
    } else {
        AddAction::AddToCart
    }
}

// Card pricing reads the raw base and discount prices, in whole pesos. The
// two-decimal effective price belongs to the customization view.
pub fn price_tag(item: &MenuItem, symbol: &str) -> PriceTag {
    let (amount, original) = match item.active_discount() {
        Some(discount_price) => (
            format_price_whole(discount_price, symbol),
            Some(format_price_whole(item.base_price, symbol)),
        ),
        None => (format_price_whole(item.base_price, symbol), None),
    };

    PriceTag { amount, original, starts_at: !item.variations.is_empty() }
}

pub fn description_line(item: &MenuItem) -> &str {
    if item.available {
        &item.description
    } else {
        "Currently Unavailable"
    }
}

pub fn format_price(amount: Decimal, symbol: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{symbol}{rounded}")
}

pub fn format_price_whole(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{symbol}{rounded}")
}

pub fn add_on_price_label(add_on: &AddOn, symbol: &str) -> String {
    if add_on.price > Decimal::ZERO {
        format!("{} each", format_price(add_on.price, symbol))
    } else {
        "Free".to_string()
    }
}

// Variations show the absolute price of the item at that variation, not the
// delta on its own.
pub fn variation_price_label(item: &MenuItem, variation: &Variation, symbol: &str) -> String {
    format_price(item.effective_base() + variation.price, symbol)
}

pub fn add_on_group_heading(category: &str) -> String {
    category
        .replace('-', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn category_heading(filter: &CategoryFilter, catalog: &Catalog) -> String {
    match filter {
        CategoryFilter::All => "ALL MENU".to_string(),
        CategoryFilter::Only(category_id) => match catalog.category(category_id) {
            Some(category) => category.name.to_uppercase(),
            None => category_id.0.to_uppercase(),
        },
    }
}
