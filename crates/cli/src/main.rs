use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use helpai_core::config::LoggingConfig as ConfigLoggingConfig;
use helpai_core::logging::{self, LoggingConfig, PrivacyConfig};
use helpai_core::{Config, HelpWidget, Resolution, StaticBuildingId, Theme, Variation};
use helpai_providers::{GraphQlClient, MockClient, SuggestionClient, SuggestionQuery};
use helpai_ui::App;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// HelpAI - an in-terminal assistant for building operators
#[derive(Parser, Debug)]
#[command(name = "helpai")]
#[command(about = "Ask the building AI assistant from a help widget", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to helpai.toml (default: ./helpai.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Building to scope questions to (overrides widget.building_id)
    #[arg(long, value_name = "ID")]
    building_id: Option<String>,

    /// Color theme: light or dark (overrides widget.theme)
    #[arg(long, value_name = "THEME")]
    theme: Option<Theme>,

    /// Starting persona: generic or insight (overrides widget.variation)
    #[arg(long, value_name = "VARIATION")]
    variation: Option<Variation>,

    /// Answer from a scripted responses file instead of the endpoint
    #[arg(long, value_name = "FILE")]
    mock: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive help widget
    Start,
    /// Ask a single question and print the answer (non-interactive mode)
    Ask {
        /// Question text
        #[arg(required = true, value_name = "PROMPT")]
        prompt: Vec<String>,
    },
    /// Print an example configuration
    Config,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        print!("{}", Config::example());
        return Ok(());
    }

    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from("helpai.toml"));
    let mut config = load_or_create_config(&config_path, cli.verbose)?;
    apply_overrides(&mut config, &cli);

    let interactive = matches!(cli.command, Commands::Start);
    let _log_guard = logging::init_logging(logging_config(&config.logging, interactive, cli.verbose))
        .context("Failed to initialize logging")?;

    if cli.verbose {
        println!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
        match cli.mock {
            Some(ref mock) => println!("{} Mock responses: {}", "Info:".blue().bold(), mock.display()),
            None => println!("{} Endpoint: {}", "Info:".blue().bold(), config.endpoint.url.cyan()),
        }
        println!(
            "{} Building: {}",
            "Info:".blue().bold(),
            config.widget.building_id.as_deref().unwrap_or(helpai_core::BUILDING_ID_SENTINEL).cyan()
        );
    }

    let client = build_client(&config, cli.mock.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    match cli.command {
        Commands::Start => runtime.block_on(cmd_start(&config, client)),
        Commands::Ask { prompt } => {
            let prompt = prompt.join(" ");
            runtime.block_on(cmd_ask(&config, client, &prompt))
        }
        Commands::Config => Ok(()),
    }
}

/// Load config from file or create from example
fn load_or_create_config(path: &Path, verbose: bool) -> Result<Config> {
    if path.exists() {
        if verbose {
            println!("{} Loading config from {}", "Info:".green().bold(), path.display());
        }
        Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    } else {
        println!("{} Config not found at {}", "Warning:".yellow().bold(), path.display());
        println!("{} Creating config from example...", "Info:".blue().bold());

        std::fs::write(path, Config::example()).context("Failed to create config")?;

        println!(
            "{} Created config at {}. Please edit it with your settings.",
            "Success:".green().bold(),
            path.display()
        );

        anyhow::bail!("Please edit {} with your settings and run again", path.display())
    }
}

/// Command-line flags win over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref building_id) = cli.building_id {
        config.widget.building_id = Some(building_id.clone());
    }
    if let Some(theme) = cli.theme {
        config.widget.theme = theme;
    }
    if let Some(variation) = cli.variation {
        config.widget.variation = variation;
    }
}

/// The TUI owns the terminal, so it only logs to file
fn logging_config(config: &ConfigLoggingConfig, interactive: bool, verbose: bool) -> LoggingConfig {
    let mut logging = LoggingConfig::from(config.clone()).with_stderr(!interactive);
    if verbose && !interactive {
        logging = logging.with_level("info");
    }
    logging
}

fn build_client(config: &Config, mock: Option<&Path>) -> Result<Arc<dyn SuggestionClient>> {
    match mock {
        Some(path) => {
            let client = MockClient::from_file(path)
                .with_context(|| format!("Failed to load mock responses from {}", path.display()))?;
            Ok(Arc::new(client))
        }
        None => Ok(Arc::new(GraphQlClient::from_config(&config.endpoint, config.widget.limit))),
    }
}

fn build_widget(config: &Config) -> HelpWidget {
    let building = StaticBuildingId::new(config.widget.building_id.clone());
    HelpWidget::new(Arc::new(building))
        .with_variation(config.widget.variation)
        .with_fallback_message(config.widget.fallback_message.clone())
        .with_privacy(PrivacyConfig {
            log_prompts: config.logging.privacy.log_prompts,
            truncate_length: config.logging.privacy.truncate_length,
        })
}

/// Start the interactive help widget
async fn cmd_start(config: &Config, client: Arc<dyn SuggestionClient>) -> Result<()> {
    let cancel_token = CancellationToken::new();
    let mut app = App::new(build_widget(config), client, config.widget.theme).with_cancel_token(cancel_token);

    app.run().await.context("Terminal error")?;
    Ok(())
}

/// Ask a single question and print the answer
async fn cmd_ask(config: &Config, client: Arc<dyn SuggestionClient>, prompt: &str) -> Result<()> {
    let widget = build_widget(config);
    match ask(widget, client, prompt).await? {
        (Resolution::Answered, Some(answer)) => println!("{} {}", "HelpAI:".green().bold(), answer),
        (Resolution::Fallback, Some(fallback)) => println!("{} {}", "HelpAI:".yellow().bold(), fallback),
        _ => println!("{} No answer was returned", "Info:".yellow().bold()),
    }
    Ok(())
}

/// Run one submission through the widget and return the line it appended
async fn ask(
    mut widget: HelpWidget, client: Arc<dyn SuggestionClient>, prompt: &str,
) -> Result<(Resolution, Option<String>)> {
    widget.set_text(prompt);
    let fetch = widget.submit().context("Question must not be empty")?;

    let (query, _resolutions) = SuggestionQuery::new(client);
    let resolution = query.fetch_now(&fetch).await;

    let outcome = widget.resolve(resolution);
    let line = if outcome.appended() { widget.transcript().last().map(|entry| entry.message.clone()) } else { None };

    Ok((outcome, line))
}
