use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariationId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddOnId(pub String);

impl std::fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for VariationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AddOnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: VariationId,
    pub name: String,
    pub price: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: AddOnId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
}

// Field names follow the storefront catalog JSON (`basePrice`, `isOnDiscount`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_price: Option<Decimal>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub is_on_discount: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    // The pricing base for every computation: the upstream-derived effective
    // price when present, otherwise the base price.
    pub fn effective_base(&self) -> Decimal {
        self.effective_price.unwrap_or(self.base_price)
    }

    pub fn active_discount(&self) -> Option<Decimal> {
        if self.is_on_discount {
            self.discount_price
        } else {
            None
        }
    }

    pub fn requires_customization(&self) -> bool {
        !self.variations.is_empty() || !self.add_ons.is_empty()
    }

    pub fn variation(&self, id: &VariationId) -> Option<&Variation> {
        self.variations.iter().find(|variation| &variation.id == id)
    }

    pub fn add_on(&self, id: &AddOnId) -> Option<&AddOn> {
        self.add_ons.iter().find(|add_on| &add_on.id == id)
    }

    // Groups add-ons by their category key, preserving the order in which
    // each group first appears and the declaration order within a group.
    pub fn add_ons_by_category(&self) -> Vec<(&str, Vec<&AddOn>)> {
        let mut groups: Vec<(&str, Vec<&AddOn>)> = Vec::new();
        for add_on in &self.add_ons {
            match groups.iter_mut().find(|(category, _)| *category == add_on.category) {
                Some((_, members)) => members.push(add_on),
                None => groups.push((add_on.category.as_str(), vec![add_on])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{AddOn, AddOnId, MenuItem, MenuItemId, Variation, VariationId};

    fn item() -> MenuItem {
        MenuItem {
            id: MenuItemId("fried-chicken".to_string()),
            name: "Fried Chicken".to_string(),
            description: "Crispy and juicy".to_string(),
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

    #[test]
    fn effective_base_falls_back_to_base_price() {
        let mut item = item();
        assert_eq!(item.effective_base(), Decimal::new(150, 0));

        item.effective_price = Some(Decimal::new(120, 0));
        assert_eq!(item.effective_base(), Decimal::new(120, 0));
    }

    #[test]
    fn active_discount_requires_the_discount_flag() {
        let mut item = item();
        item.discount_price = Some(Decimal::new(120, 0));
        assert_eq!(item.active_discount(), None);

        item.is_on_discount = true;
        assert_eq!(item.active_discount(), Some(Decimal::new(120, 0)));
    }

    #[test]
    fn customization_is_required_with_variations_or_add_ons() {
        let mut item = item();
        assert!(!item.requires_customization());

        item.variations.push(Variation {
            id: VariationId("large".to_string()),
            name: "Large".to_string(),
            price: Decimal::new(20, 0),
        });
        assert!(item.requires_customization());

        item.variations.clear();
        item.add_ons.push(AddOn {
            id: AddOnId("extra-rice".to_string()),
            name: "Extra Rice".to_string(),
            category: "sides".to_string(),
            price: Decimal::new(15, 0),
        });
        assert!(item.requires_customization());
    }

    #[test]
    fn add_on_groups_keep_first_appearance_order() {
        let mut item = item();
        for (id, category) in
            [("gravy", "sauces"), ("extra-rice", "sides"), ("hot-sauce", "sauces")]
        {
            item.add_ons.push(AddOn {
                id: AddOnId(id.to_string()),
                name: id.to_string(),
                category: category.to_string(),
                price: Decimal::new(10, 0),
            });
        }

        let groups = item.add_ons_by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "sauces");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "sides");
    }

    #[test]
    fn wire_format_uses_storefront_field_names() {
        let json = serde_json::to_string(&item()).expect("serialize menu item");
        assert!(json.contains("\"basePrice\""));
        assert!(json.contains("\"isOnDiscount\""));
        assert!(!json.contains("\"base_price\""));
    }

    #[test]
    fn availability_defaults_to_true_when_absent() {
        let parsed: MenuItem = serde_json::from_str(
            r#"{"id":"chicken-wrap","name":"Chicken Wrap","basePrice":95}"#,
        )
        .expect("parse minimal item");

        assert!(parsed.available);
        assert!(parsed.variations.is_empty());
        assert!(parsed.add_ons.is_empty());
    }
}
