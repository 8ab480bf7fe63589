//! Chat analyzer: aggregate nouns, verbs and entities from chat messages

use chat_analyzer::cli::{self, Cli, Commands, ConfigAction};
use chat_analyzer::config::Config;
use chat_analyzer::error::{ChatAnalyzerError, Result};
use chat_analyzer::nlp::load_model;
use chat_analyzer::output::formatter::{save_report_to_file, ReportGenerator};
use chat_analyzer::output::report::AnalysisReport;
use chat_analyzer::processing::ChatAnalyzer;
use chat_analyzer::server;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Serve { host, port, model } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if model.is_some() {
                config.model.path = model;
            }

            // The process must not serve without a model
            let model = match load_model(&config.model) {
                Ok(model) => model,
                Err(e) => {
                    error!("{}", e);
                    process::exit(1);
                }
            };

            server::serve(&config, ChatAnalyzer::new(model)).await?;
        }

        Commands::Analyze { text, output, model, save } => {
            if model.is_some() {
                config.model.path = model;
            }

            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(ChatAnalyzerError::Validation)?,
                None => config.output.format.clone(),
            };

            let analyzer = ChatAnalyzer::new(load_model(&config.model)?);

            let start_time = Instant::now();
            let response = analyzer.analyze(&text)?;
            let elapsed = start_time.elapsed().as_millis() as u64;

            let report = AnalysisReport::new(&text, analyzer.model_name(), response, elapsed);
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, true);
            let rendered = generator.generate_report(&report, &format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| ChatAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }

            Some(ConfigAction::Reset) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                info!("Configuration reset: {}", path.display());
            }
        },
    }

    Ok(())
}
