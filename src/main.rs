use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use tfcost::advisor::{Advisor, GeminiAdvisor};
use tfcost::config::{self, Config};
use tfcost::parser::parse_terraform;
use tfcost::pricing::{calculate_costs, CostLine, Provider};
use tfcost::report;

#[derive(Parser)]
#[command(name = "tfcost")]
#[command(
    about = "Estimate monthly cloud costs from Terraform before you deploy",
    long_about = "tfcost parses a Terraform file locally, prices the compute resources it finds\nagainst built-in AWS, Azure, and GCP price tables, and can ask Gemini for\ncost and security suggestions.\n\nSupports:\n  - aws_instance\n  - azurerm_linux_virtual_machine / azurerm_windows_virtual_machine / azurerm_virtual_machine\n  - google_compute_instance"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Terraform file and estimate monthly costs
    Estimate {
        /// Terraform file to analyze
        file: PathBuf,
        /// Restrict the report to one provider
        #[arg(long, value_enum, default_value = "all")]
        provider: ProviderFilter,
        /// Output format
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// Ask Gemini for cost and security suggestions
    Advise {
        /// Terraform file to analyze
        file: PathBuf,
        /// Gemini API key (falls back to the config file)
        #[arg(long, env = "GEMINI_API_KEY")]
        api_key: Option<String>,
        /// Model to query (defaults to the config file value)
        #[arg(long)]
        model: Option<String>,
    },
    /// Initialize a tfcost configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".tfcost.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderFilter {
    All,
    Aws,
    Azure,
    Gcp,
}

impl ProviderFilter {
    fn matches(self, provider: Provider) -> bool {
        match self {
            ProviderFilter::All => true,
            ProviderFilter::Aws => provider == Provider::Aws,
            ProviderFilter::Azure => provider == Provider::Azure,
            ProviderFilter::Gcp => provider == Provider::Gcp,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ProviderFilter::All => "all clouds",
            ProviderFilter::Aws => "AWS",
            ProviderFilter::Azure => "Azure",
            ProviderFilter::Gcp => "GCP",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Suppress INFO by default, only show warnings and errors
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Estimate {
            file,
            provider,
            output,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let resources = parse_terraform(&content);
            let lines: Vec<CostLine> = calculate_costs(&resources)
                .into_iter()
                .filter(|line| provider.matches(line.provider))
                .collect();

            let format = output.unwrap_or(if config.output.format == "json" {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            });

            match format {
                OutputFormat::Text => report::print_cost_report(&lines, provider.label()),
                OutputFormat::Json => println!("{}", report::render_json(&lines)?),
            }
        }
        Commands::Advise {
            file,
            api_key,
            model,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let key = api_key
                .or_else(|| config.gemini.api_key.clone())
                .unwrap_or_default();
            let model = model.unwrap_or_else(|| config.gemini.model.clone());

            // Fails before any network call if the key is missing
            let advisor = GeminiAdvisor::new(key, model)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Analyzing configuration with Gemini...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = advisor.analyze(&content).await;
            spinner.finish_and_clear();

            let suggestions = result?;
            report::print_suggestions(&suggestions);
        }
        Commands::Init { output } => {
            config::init_config(&output)?;
        }
    }

    Ok(())
}
