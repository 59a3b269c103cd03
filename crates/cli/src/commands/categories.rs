use carty_core::config::AppConfig;
use carty_core::display;
use carty_core::ordering::{Catalog, CategoryFilter};
use serde::Serialize;

use super::{escape_json, load_catalog, CommandResult};

#[derive(Debug, Serialize)]
struct CategoryRow {
    id: String,
    name: String,
    icon: Option<String>,
    heading: String,
    items: usize,
}

#[derive(Debug, Serialize)]
struct CategoriesReport {
    menu_heading: String,
    total_items: usize,
    categories: Vec<CategoryRow>,
}

pub fn run(config: &AppConfig, json_output: bool) -> CommandResult {
    let catalog = match load_catalog(config, "categories") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let report = build_report(&catalog);

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!("{{\"error\":\"{}\"}}", escape_json(&error.to_string()))
        });
        return CommandResult { exit_code: 0, output };
    }

    CommandResult { exit_code: 0, output: render_human(&report) }
}

fn build_report(catalog: &Catalog) -> CategoriesReport {
    let categories = catalog
        .categories()
        .iter()
        .map(|category| {
            let filter = CategoryFilter::Only(category.id.clone());
            CategoryRow {
                id: category.id.to_string(),
                name: category.name.clone(),
                icon: category.icon.clone(),
                heading: display::category_heading(&filter, catalog),
                items: catalog.items_in(&filter).len(),
            }
        })
        .collect();

    CategoriesReport {
        menu_heading: display::category_heading(&CategoryFilter::All, catalog),
        total_items: catalog.items().len(),
        categories,
    }
}

fn render_human(report: &CategoriesReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{} (items: {})", report.menu_heading, report.total_items));

    for row in &report.categories {
        lines.push(format!("- {}: {} (items: {})", row.id, row.heading, row.items));
    }

    lines.join("\n")
}
