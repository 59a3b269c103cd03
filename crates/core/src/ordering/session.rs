use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{
    cart::CartLineRequest,
    menu::{AddOn, AddOnId, MenuItem, Variation, VariationId},
};
use crate::errors::DomainError;
use crate::ordering::pricing::{self, PriceBreakdown};

// Entry point for the add-to-cart affordance. Items without variations or
// add-ons skip straight to a bare line; everything else opens a session.
#[derive(Clone, Debug)]
pub enum AddFlow {
    Bare(CartLineRequest),
    Customize(CustomizationSession),
}

impl AddFlow {
    pub fn for_item(item: MenuItem) -> Result<Self, DomainError> {
        if !item.available {
            return Err(DomainError::ItemUnavailable(item.id.clone()));
        }
        if item.requires_customization() {
            Ok(Self::Customize(CustomizationSession::open(item)?))
        } else {
            Ok(Self::Bare(CartLineRequest::bare(item)))
        }
    }
}

// A transient customization in progress. Confirming or cancelling consumes the
// session; nothing reaches the cart until `confirm`.
#[derive(Clone, Debug)]
pub struct CustomizationSession {
    item: MenuItem,
    selected_variation: Option<VariationId>,
    quantities: HashMap<AddOnId, u32>,
}

impl CustomizationSession {
    // Opens with the first declared variation preselected and no add-ons.
    pub fn open(item: MenuItem) -> Result<Self, DomainError> {
        if !item.available {
            return Err(DomainError::ItemUnavailable(item.id.clone()));
        }
        let selected_variation = item.variations.first().map(|variation| variation.id.clone());

        Ok(Self { item, selected_variation, quantities: HashMap::new() })
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn selected_variation(&self) -> Option<&Variation> {
        self.selected_variation.as_ref().and_then(|id| self.item.variation(id))
    }

    // Single choice: selecting replaces whatever was selected before.
    pub fn select_variation(&mut self, id: &VariationId) -> Result<(), DomainError> {
        if self.item.variation(id).is_none() {
            return Err(DomainError::UnknownVariation {
                item: self.item.id.clone(),
                variation: id.clone(),
            });
        }
        self.selected_variation = Some(id.clone());
        Ok(())
    }

    pub fn add_on_quantity(&self, id: &AddOnId) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    // Absolute target. Zero and below drop the entry entirely, so an
    // untouched add-on and one stepped back down are indistinguishable.
    // Returns the stored quantity.
    pub fn set_add_on_quantity(&mut self, id: &AddOnId, quantity: i64) -> Result<u32, DomainError> {
        if self.item.add_on(id).is_none() {
            return Err(DomainError::UnknownAddOn {
                item: self.item.id.clone(),
                add_on: id.clone(),
            });
        }
        if quantity <= 0 {
            self.quantities.remove(id);
            return Ok(0);
        }
        let stored = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.quantities.insert(id.clone(), stored);
        Ok(stored)
    }

    pub fn increment_add_on(&mut self, id: &AddOnId) -> Result<u32, DomainError> {
        let current = self.add_on_quantity(id);
        self.set_add_on_quantity(id, i64::from(current) + 1)
    }

    pub fn decrement_add_on(&mut self, id: &AddOnId) -> Result<u32, DomainError> {
        let current = self.add_on_quantity(id);
        self.set_add_on_quantity(id, i64::from(current) - 1)
    }

    // Chosen add-ons in menu declaration order, not pick order.
    pub fn selected_add_ons(&self) -> Vec<(&AddOn, u32)> {
        self.item
            .add_ons
            .iter()
            .filter_map(|add_on| self.quantities.get(&add_on.id).map(|quantity| (add_on, *quantity)))
            .collect()
    }

    pub fn grouped_add_ons(&self) -> Vec<(&str, Vec<&AddOn>)> {
        self.item.add_ons_by_category()
    }

    // Running total for the current selection. Reading the price never
    // changes the selection.
    pub fn price(&self) -> Decimal {
        self.price_breakdown().total
    }

    pub fn price_breakdown(&self) -> PriceBreakdown {
        pricing::selection_breakdown(
            &self.item,
            self.selected_variation(),
            &self.selected_add_ons(),
        )
    }

    // Emits one line at quantity 1. An add-on chosen at quantity n is
    // flattened into n repeated plain copies.
    pub fn confirm(self) -> CartLineRequest {
        let variation = self.selected_variation().cloned();
        let mut add_ons = Vec::new();
        for (add_on, quantity) in self.selected_add_ons() {
            for _ in 0..quantity {
                add_ons.push(add_on.clone());
            }
        }

        CartLineRequest { item: self.item, quantity: 1, variation, add_ons }
    }

    // Discards the selection without emitting anything.
    pub fn cancel(self) {}
}
