use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use carty_core::config::{AppConfig, ConfigOverrides};
use toml::Value;

pub fn run(config: &AppConfig, explicit_path: Option<&Path>, overrides: &ConfigOverrides) -> String {
    let config_file_path = detect_config_path(explicit_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    lines.push(render_line(
        "site.name",
        &config.site.name,
        field_source(
            "site.name",
            None,
            &["CARTY_SITE_NAME"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "site.logo",
        &config.site.logo,
        field_source(
            "site.logo",
            None,
            &["CARTY_SITE_LOGO"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "menu.path",
        &config.menu.path.display().to_string(),
        field_source(
            "menu.path",
            overrides.menu_path.as_deref().map(|_| "--menu"),
            &["CARTY_MENU_PATH"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "menu.currency_symbol",
        &config.menu.currency_symbol,
        field_source(
            "menu.currency_symbol",
            overrides.currency_symbol.as_deref().map(|_| "--symbol"),
            &["CARTY_CURRENCY_SYMBOL"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            None,
            &["CARTY_LOGGING_LEVEL", "CARTY_LOG_LEVEL"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            None,
            &["CARTY_LOGGING_FORMAT", "CARTY_LOG_FORMAT"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn detect_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    if let Some(value) = env::var_os("CARTY_CONFIG_PATH") {
        let path = PathBuf::from(value);
        return path.exists().then_some(path);
    }

    let root = PathBuf::from("carty.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/carty.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    flag_override: Option<&str>,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(flag) = flag_override {
        return format!("flag ({flag})");
    }

    for env_key in env_keys {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
