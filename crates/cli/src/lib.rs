pub mod commands;

use carty_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "carty",
    about = "Carty storefront CLI",
    long_about = "Browse the Carty menu, price customized selections, stage cart lines, and inspect menu data health.",
    after_help = "Examples:\n  carty menu --category silog-meals\n  carty price fried-chicken --variation large --add-on extra-rice=2\n  carty add fried-chicken --times 2\n  carty check --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the carty.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Path to the menu JSON document")]
    menu: Option<PathBuf>,
    #[arg(long, global = true, help = "Currency symbol used for rendered prices")]
    symbol: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List menu items as storefront cards, optionally filtered to one category")]
    Menu {
        #[arg(long, help = "Category id to filter by (defaults to the whole menu)")]
        category: Option<String>,
        #[arg(long, help = "Keep only items flagged as popular")]
        popular: bool,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List menu categories with their storefront headings and item counts")]
    Categories {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Price a customized selection without staging it")]
    Price {
        #[arg(help = "Menu item id")]
        item: String,
        #[arg(long, help = "Variation id to select")]
        variation: Option<String>,
        #[arg(long = "add-on", value_name = "ID[=QTY]", help = "Add-on selection, repeatable")]
        add_on: Vec<String>,
    },
    #[command(about = "Stage a customized selection into an in-memory cart and report the result")]
    Add {
        #[arg(help = "Menu item id")]
        item: String,
        #[arg(long, help = "Variation id to select")]
        variation: Option<String>,
        #[arg(long = "add-on", value_name = "ID[=QTY]", help = "Add-on selection, repeatable")]
        add_on: Vec<String>,
        #[arg(long, default_value_t = 1, help = "How many times to stage the same line")]
        times: u32,
    },
    #[command(about = "Validate menu data and report violations")]
    Check {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                menu_path: self.menu.clone(),
                currency_symbol: self.symbol.clone(),
                log_level: None,
            },
        }
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Menu { .. } => "menu",
            Command::Categories { .. } => "categories",
            Command::Price { .. } => "price",
            Command::Add { .. } => "add",
            Command::Check { .. } => "check",
            Command::Config => "config",
        }
    }
}

fn init_logging(config: &AppConfig) {
    use carty_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Load config and initialize logging before dispatching any command
    let config = match AppConfig::load(cli.load_options()) {
        Ok(config) => config,
        Err(error) => {
            let result = commands::CommandResult::failure(
                cli.command.name(),
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    tracing::debug!(
        event_name = "system.cli.config_loaded",
        menu_path = %config.menu.path.display(),
        "configuration loaded"
    );

    let result = match cli.command {
        Command::Menu { category, popular, json } => {
            commands::menu::run(&config, category.as_deref(), popular, json)
        }
        Command::Categories { json } => commands::categories::run(&config, json),
        Command::Price { item, variation, add_on } => {
            commands::price::run(&config, &item, variation.as_deref(), &add_on)
        }
        Command::Add { item, variation, add_on, times } => {
            commands::add::run(&config, &item, variation.as_deref(), &add_on, times)
        }
        Command::Check { json } => commands::check::run(&config, json),
        Command::Config => {
            let overrides = cli.load_options().overrides;
            commands::CommandResult {
                exit_code: 0,
                output: commands::config::run(&config, cli.config.as_deref(), &overrides),
            }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
