pub mod add;
pub mod categories;
pub mod check;
pub mod config;
pub mod menu;
pub mod price;
mod selection;

use carty_core::config::AppConfig;
use carty_core::ordering::Catalog;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, data: serde_json::Value) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

// Every read command starts from the same menu document, so the load and its
// failure envelope live in one place.
pub(crate) fn load_catalog(config: &AppConfig, command: &str) -> Result<Catalog, CommandResult> {
    match Catalog::from_json_file(&config.menu.path) {
        Ok(catalog) => {
            tracing::debug!(
                event_name = "system.cli.catalog_loaded",
                item_count = catalog.items().len(),
                category_count = catalog.categories().len(),
                "menu catalog loaded"
            );
            Ok(catalog)
        }
        Err(error) => {
            tracing::warn!(
                event_name = "system.cli.catalog_load_failed",
                path = %config.menu.path.display(),
                error = %error,
                "menu catalog could not be loaded"
            );
            Err(CommandResult::failure(command, "catalog_load", error.to_string(), 3))
        }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            escape_json(&error.to_string())
        )
    })
}

pub(crate) fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
