use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::menu::MenuItem;
use crate::ordering::catalog::Catalog;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuViolation {
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<MenuViolation>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self { valid: true, violations: Vec::new() }
    }
}

pub fn validate_catalog(catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_item_ids: HashSet<String> = HashSet::new();

    for item in catalog.items() {
        let item_id = item.id.0.trim().to_owned();

        if !seen_item_ids.insert(item_id.clone()) {
            report.violations.push(MenuViolation {
                code: "DUPLICATE_ITEM_ID".to_string(),
                message: format!("Duplicate item id in menu: {item_id}"),
                suggestion: Some("Give every menu item a unique id".to_string()),
            });
        }

        if item.name.trim().is_empty() {
            report.violations.push(MenuViolation {
                code: "EMPTY_ITEM_NAME".to_string(),
                message: format!("Item {item_id} has an empty name"),
                suggestion: Some("Give the item a display name".to_string()),
            });
        }

        if item.base_price < Decimal::ZERO {
            report.violations.push(MenuViolation {
                code: "NEGATIVE_BASE_PRICE".to_string(),
                message: format!("Item {item_id} has a negative base price"),
                suggestion: Some("Use a non-negative base price".to_string()),
            });
        }

        validate_discount(item, &item_id, &mut report);
        validate_options(item, &item_id, &mut report);

        if let Some(category_id) = &item.category {
            if catalog.category(category_id).is_none() {
                report.violations.push(MenuViolation {
                    code: "UNKNOWN_CATEGORY".to_string(),
                    message: format!(
                        "Item {item_id} references undeclared category {category_id}"
                    ),
                    suggestion: Some("Declare the category or drop the reference".to_string()),
                });
            }
        }
    }

    if !report.violations.is_empty() {
        report.valid = false;
    }

    report
}

fn validate_discount(item: &MenuItem, item_id: &str, report: &mut ValidationReport) {
    if item.is_on_discount {
        match item.discount_price {
            None => {
                report.violations.push(MenuViolation {
                    code: "MISSING_DISCOUNT_PRICE".to_string(),
                    message: format!("Item {item_id} is flagged on discount without a price"),
                    suggestion: Some("Set discountPrice or clear isOnDiscount".to_string()),
                });
            }
            Some(discount_price) if discount_price >= item.base_price => {
                report.violations.push(MenuViolation {
                    code: "DISCOUNT_NOT_BELOW_BASE".to_string(),
                    message: format!(
                        "Item {item_id} discount price does not undercut the base price"
                    ),
                    suggestion: Some("Set discountPrice strictly below basePrice".to_string()),
                });
            }
            Some(_) => {}
        }
    }

    // effectivePrice is a denormalized copy of whichever price is live.
    if let Some(effective_price) = item.effective_price {
        let live = item.active_discount().unwrap_or(item.base_price);
        if effective_price != live {
            report.violations.push(MenuViolation {
                code: "STALE_EFFECTIVE_PRICE".to_string(),
                message: format!("Item {item_id} carries an out-of-date effective price"),
                suggestion: Some("Recompute effectivePrice from the discount state".to_string()),
            });
        }
    }
}

fn validate_options(item: &MenuItem, item_id: &str, report: &mut ValidationReport) {
    let mut seen_variation_ids: HashSet<&str> = HashSet::new();
    for variation in &item.variations {
        if !seen_variation_ids.insert(variation.id.0.as_str()) {
            report.violations.push(MenuViolation {
                code: "DUPLICATE_VARIATION_ID".to_string(),
                message: format!("Item {item_id} declares variation {} twice", variation.id),
                suggestion: Some("Give every variation a unique id".to_string()),
            });
        }
        if variation.price < Decimal::ZERO {
            report.violations.push(MenuViolation {
                code: "NEGATIVE_VARIATION_PRICE".to_string(),
                message: format!(
                    "Item {item_id} variation {} has a negative price delta",
                    variation.id
                ),
                suggestion: Some("Use a non-negative variation price".to_string()),
            });
        }
    }

    let mut seen_add_on_ids: HashSet<&str> = HashSet::new();
    for add_on in &item.add_ons {
        if !seen_add_on_ids.insert(add_on.id.0.as_str()) {
            report.violations.push(MenuViolation {
                code: "DUPLICATE_ADDON_ID".to_string(),
                message: format!("Item {item_id} declares add-on {} twice", add_on.id),
                suggestion: Some("Give every add-on a unique id".to_string()),
            });
        }
        if add_on.price < Decimal::ZERO {
            report.violations.push(MenuViolation {
                code: "NEGATIVE_ADDON_PRICE".to_string(),
                message: format!("Item {item_id} add-on {} has a negative price", add_on.id),
                suggestion: Some("Use a non-negative add-on price".to_string()),
            });
        }
    }
}
