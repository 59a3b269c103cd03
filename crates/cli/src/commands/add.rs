use carty_core::cart::{CartSink, InMemoryCart};
use carty_core::config::AppConfig;
use carty_core::display;
use carty_core::domain::MenuItemId;
use carty_core::ordering::{pricing, AddFlow};
use serde_json::json;

use super::selection::build_session;
use super::{load_catalog, CommandResult};

pub fn run(
    config: &AppConfig,
    item_id: &str,
    variation: Option<&str>,
    add_ons: &[String],
    times: u32,
) -> CommandResult {
    let catalog = match load_catalog(config, "add") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    // Explicit selections force the customization path so unknown ids are
    // caught instead of silently dropped.
    let line = if variation.is_some() || !add_ons.is_empty() {
        match build_session(&catalog, item_id, variation, add_ons) {
            Ok(session) => session.confirm(),
            Err(error) => {
                return CommandResult::failure("add", error.error_class(), error.message(), 1)
            }
        }
    } else {
        let id = MenuItemId(item_id.to_string());
        let item = match catalog.find(&id) {
            Some(item) => item.clone(),
            None => {
                return CommandResult::failure(
                    "add",
                    "unknown_item",
                    format!("menu item `{item_id}` not found"),
                    1,
                )
            }
        };

        // Same split as the storefront add button: plain items go straight
        // to the cart, customizable ones confirm their default selections.
        match AddFlow::for_item(item) {
            Ok(AddFlow::Bare(request)) => request,
            Ok(AddFlow::Customize(session)) => session.confirm(),
            Err(error) => {
                return CommandResult::failure("add", "domain_validation", error.to_string(), 1)
            }
        }
    };

    let cart = InMemoryCart::default();
    for _ in 0..times {
        cart.add_line(line.clone());
    }

    let symbol = &config.menu.currency_symbol;
    let unit_price = pricing::line_unit_price(&line);
    let staged = cart.item_quantity(&line.item.id);
    tracing::debug!(
        event_name = "system.cli.lines_staged",
        item = %line.item.id,
        staged,
        "cart lines staged"
    );

    let message = format!(
        "added {staged} x {} at {} each",
        line.item.name,
        display::format_price(unit_price, symbol)
    );
    let data = json!({
        "lines": cart.lines(),
        "items_count": cart.items_count(),
        "unit_price": display::format_price(unit_price, symbol),
        "cart_total": display::format_price(cart.total(), symbol),
    });

    CommandResult::success("add", message, data)
}
