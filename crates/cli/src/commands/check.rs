use carty_core::config::AppConfig;
use carty_core::ordering::{validate_catalog, Catalog, MenuViolation};
use serde::Serialize;

use super::{escape_json, load_catalog, CommandResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    overall_status: CheckStatus,
    summary: String,
    violations: Vec<MenuViolation>,
}

pub fn run(config: &AppConfig, json_output: bool) -> CommandResult {
    let catalog = match load_catalog(config, "check") {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let report = build_report(&catalog);
    let exit_code = match report.overall_status {
        CheckStatus::Pass => 0,
        CheckStatus::Fail => 1,
    };
    tracing::debug!(
        event_name = "system.cli.menu_validated",
        valid = report.violations.is_empty(),
        violation_count = report.violations.len(),
        "menu data validated"
    );

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"check serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code, output };
    }

    CommandResult { exit_code, output: render_human(&report) }
}

fn build_report(catalog: &Catalog) -> CheckReport {
    let validation = validate_catalog(catalog);

    let overall_status = if validation.valid { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if validation.valid {
        format!(
            "check: menu data passed ({} items, {} categories)",
            catalog.items().len(),
            catalog.categories().len()
        )
    } else {
        format!("check: menu data failed with {} violations", validation.violations.len())
    };

    CheckReport { overall_status, summary, violations: validation.violations }
}

fn render_human(report: &CheckReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for violation in &report.violations {
        let mut line = format!("- [{}] {}", violation.code, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            line.push_str(&format!(" (hint: {suggestion})"));
        }
        lines.push(line);
    }

    lines.join("\n")
}
