use carty_core::domain::{AddOnId, MenuItemId, VariationId};
use carty_core::errors::DomainError;
use carty_core::ordering::{Catalog, CustomizationSession};

/// Failures encountered while turning command-line flags into a
/// customization session.
#[derive(Debug)]
pub(crate) enum SelectionError {
    UnknownItem(String),
    InvalidAddOnArgument(String),
    Domain(DomainError),
}

impl SelectionError {
    pub(crate) fn error_class(&self) -> &'static str {
        match self {
            SelectionError::UnknownItem(_) => "unknown_item",
            SelectionError::InvalidAddOnArgument(_) => "invalid_argument",
            SelectionError::Domain(_) => "domain_validation",
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            SelectionError::UnknownItem(id) => format!("menu item `{id}` not found"),
            SelectionError::InvalidAddOnArgument(raw) => {
                format!("invalid add-on selection `{raw}`, expected ID or ID=QTY")
            }
            SelectionError::Domain(error) => error.to_string(),
        }
    }
}

/// Opens a customization session for the item and applies the variation and
/// add-on selections given on the command line.
pub(crate) fn build_session(
    catalog: &Catalog,
    item_id: &str,
    variation: Option<&str>,
    add_ons: &[String],
) -> Result<CustomizationSession, SelectionError> {
    let id = MenuItemId(item_id.to_string());
    let item =
        catalog.find(&id).ok_or_else(|| SelectionError::UnknownItem(item_id.to_string()))?;

    let mut session = CustomizationSession::open(item.clone()).map_err(SelectionError::Domain)?;

    if let Some(variation_id) = variation {
        session
            .select_variation(&VariationId(variation_id.to_string()))
            .map_err(SelectionError::Domain)?;
    }

    for raw in add_ons {
        let (add_on_id, quantity) = parse_add_on_argument(raw)?;
        session
            .set_add_on_quantity(&AddOnId(add_on_id), quantity)
            .map_err(SelectionError::Domain)?;
    }

    Ok(session)
}

fn parse_add_on_argument(raw: &str) -> Result<(String, i64), SelectionError> {
    let trimmed = raw.trim();

    match trimmed.split_once('=') {
        None if trimmed.is_empty() => Err(SelectionError::InvalidAddOnArgument(raw.to_string())),
        None => Ok((trimmed.to_string(), 1)),
        Some((id, quantity)) => {
            let id = id.trim();
            if id.is_empty() {
                return Err(SelectionError::InvalidAddOnArgument(raw.to_string()));
            }
            match quantity.trim().parse::<i64>() {
                Ok(parsed) => Ok((id.to_string(), parsed)),
                Err(_) => Err(SelectionError::InvalidAddOnArgument(raw.to_string())),
            }
        }
    }
}
