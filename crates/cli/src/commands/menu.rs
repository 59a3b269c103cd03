use carty_core::config::AppConfig;
use carty_core::display::{self, AddAction, CardBadge, PriceTag};
use carty_core::domain::{CategoryId, MenuItem};
use carty_core::ordering::{Catalog, CategoryFilter};
use serde::Serialize;

use super::{escape_json, load_catalog, CommandResult};

#[derive(Debug, Serialize)]
struct MenuCard {
    id: String,
    name: String,
    description: String,
    price: PriceTag,
    badges: Vec<CardBadge>,
    discount_badge: Option<String>,
    action: AddAction,
}

#[derive(Debug, Serialize)]
struct MenuReport {
    heading: String,
    cards: Vec<MenuCard>,
}

pub fn run(
    config: &AppConfig,
    category: Option<&str>,
    popular: bool,
    json_output: bool,
) -> CommandResult {
    let catalog = match load_catalog(config, "menu") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let filter = category_filter(category);
    let report = build_report(&catalog, &filter, popular, &config.menu.currency_symbol);

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"heading\":\"{}\",\"error\":\"{}\"}}",
                escape_json(&report.heading),
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code: 0, output };
    }

    CommandResult { exit_code: 0, output: render_human(&report) }
}

fn category_filter(category: Option<&str>) -> CategoryFilter {
    match category {
        None => CategoryFilter::All,
        Some("all") => CategoryFilter::All,
        Some(id) => CategoryFilter::Only(CategoryId(id.to_string())),
    }
}

fn build_report(
    catalog: &Catalog,
    filter: &CategoryFilter,
    popular: bool,
    symbol: &str,
) -> MenuReport {
    let heading = display::category_heading(filter, catalog);
    let mut items = catalog.items_in(filter);
    if popular {
        items.retain(|item| item.popular);
    }
    let cards = items.into_iter().map(|item| card_for(item, symbol)).collect();
    MenuReport { heading, cards }
}

fn card_for(item: &MenuItem, symbol: &str) -> MenuCard {
    MenuCard {
        id: item.id.to_string(),
        name: item.name.clone(),
        description: display::description_line(item).to_string(),
        price: display::price_tag(item, symbol),
        badges: display::badges(item),
        discount_badge: display::discount_badge(item),
        action: display::add_action(item, 0),
    }
}

fn render_human(report: &MenuReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.heading.clone());

    if report.cards.is_empty() {
        lines.push("(no items in this category)".to_string());
    }

    for card in &report.cards {
        let mut price = card.price.amount.clone();
        if card.price.starts_at {
            price = format!("Starts at {price}");
        }
        if let Some(original) = &card.price.original {
            price.push_str(&format!(" (was {original})"));
        }

        let mut line = format!("- {}: {}", card.name, price);
        for badge in &card.badges {
            let tag = match badge {
                CardBadge::Sale => "SALE!",
                CardBadge::Popular => "POPULAR",
            };
            line.push_str(&format!(" {tag}"));
        }
        if let Some(discount) = &card.discount_badge {
            line.push_str(&format!(" {discount}"));
        }
        lines.push(line);

        let action = card.action.label().unwrap_or("ADD");
        lines.push(format!("    {} [{action}]", card.description));
    }

    lines.join("\n")
}
