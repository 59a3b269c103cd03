use carty_core::config::AppConfig;
use carty_core::display;
use serde_json::json;

use super::selection::build_session;
use super::{load_catalog, CommandResult};

pub fn run(
    config: &AppConfig,
    item_id: &str,
    variation: Option<&str>,
    add_ons: &[String],
) -> CommandResult {
    let catalog = match load_catalog(config, "price") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let session = match build_session(&catalog, item_id, variation, add_ons) {
        Ok(session) => session,
        Err(error) => {
            return CommandResult::failure("price", error.error_class(), error.message(), 1)
        }
    };

    let symbol = &config.menu.currency_symbol;
    let breakdown = session.price_breakdown();
    let formatted_total = display::format_price(breakdown.total, symbol);
    tracing::debug!(
        event_name = "system.cli.selection_priced",
        item = %session.item().id,
        total = %breakdown.total,
        "selection priced"
    );

    let add_on_rows: Vec<_> = session
        .selected_add_ons()
        .iter()
        .map(|(add_on, quantity)| {
            json!({
                "id": add_on.id,
                "name": add_on.name,
                "quantity": quantity,
                "price_label": display::add_on_price_label(add_on, symbol),
            })
        })
        .collect();

    let message = format!("{}: {formatted_total}", session.item().name);
    let data = json!({
        "item": session.item().id,
        "variation": session.selected_variation().map(|variation| variation.id.clone()),
        "add_ons": add_on_rows,
        "breakdown": breakdown,
        "formatted_total": formatted_total,
    });

    CommandResult::success("price", message, data)
}
