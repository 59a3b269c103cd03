use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Serialize)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub menu: MenuConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct SiteConfig {
    pub name: String,
    pub logo: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct MenuConfig {
    pub path: PathBuf,
    pub currency_symbol: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub menu_path: Option<PathBuf>,
    pub currency_symbol: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig {
                name: "Carty Storefront".to_string(),
                logo: "logo.jpg".to_string(),
            },
            menu: MenuConfig {
                path: PathBuf::from("menu.json"),
                currency_symbol: "\u{20b1}".to_string(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("carty.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(site) = patch.site {
            if let Some(name) = site.name {
                self.site.name = name;
            }
            if let Some(logo) = site.logo {
                self.site.logo = logo;
            }
        }

        if let Some(menu) = patch.menu {
            if let Some(path) = menu.path {
                self.menu.path = PathBuf::from(path);
            }
            if let Some(currency_symbol) = menu.currency_symbol {
                self.menu.currency_symbol = currency_symbol;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("CARTY_SITE_NAME") {
            self.site.name = value;
        }
        if let Some(value) = read_env("CARTY_SITE_LOGO") {
            self.site.logo = value;
        }

        if let Some(value) = read_env("CARTY_MENU_PATH") {
            self.menu.path = PathBuf::from(value);
        }
        if let Some(value) = read_env("CARTY_CURRENCY_SYMBOL") {
            self.menu.currency_symbol = value;
        }

        let log_level = read_env("CARTY_LOGGING_LEVEL").or_else(|| read_env("CARTY_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("CARTY_LOGGING_FORMAT").or_else(|| read_env("CARTY_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(menu_path) = overrides.menu_path {
            self.menu.path = menu_path;
        }
        if let Some(currency_symbol) = overrides.currency_symbol {
            self.menu.currency_symbol = currency_symbol;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_site(&self.site)?;
        validate_menu(&self.menu)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    if let Some(value) = read_env("CARTY_CONFIG_PATH") {
        let path = PathBuf::from(value);
        return path.exists().then_some(path);
    }

    [PathBuf::from("carty.toml"), PathBuf::from("config/carty.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    if site.name.trim().is_empty() {
        return Err(ConfigError::Validation("site.name must not be empty".to_string()));
    }

    Ok(())
}

fn validate_menu(menu: &MenuConfig) -> Result<(), ConfigError> {
    if menu.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("menu.path must not be empty".to_string()));
    }

    if menu.currency_symbol.is_empty() {
        return Err(ConfigError::Validation("menu.currency_symbol must not be empty".to_string()));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    site: Option<SitePatch>,
    menu: Option<MenuPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct SitePatch {
    name: Option<String>,
    logo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MenuPatch {
    path: Option<String>,
    currency_symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
