use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "replenish")]
#[command(about = "Demand forecasting and replenishment decisions for critical supply items", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the prediction-to-requisition pipeline over a stock file
    Forecast {
        /// Config file path
        #[arg(short, long, default_value = "config/Replenish.toml")]
        config: String,
        /// User stock file (CSV with ITEM and STOCK_ACTUAL columns)
        #[arg(short, long)]
        stock: String,
        /// Historical dataset CSV (overrides config)
        #[arg(long)]
        history: Option<String>,
        /// Per-item error table CSV (overrides config)
        #[arg(long)]
        errors: Option<String>,
        /// Model artifact JSON (overrides config)
        #[arg(long)]
        model: Option<String>,
        /// Comma-separated item subset; defaults to every item in the stock file
        #[arg(long, value_delimiter = ',')]
        items: Option<Vec<String>>,
        /// Output directory for the exported CSVs (overrides config)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the deduplicated item catalog from the historical dataset
    Catalog {
        /// Config file path
        #[arg(short, long, default_value = "config/Replenish.toml")]
        config: String,
        /// Historical dataset CSV (overrides config)
        #[arg(long)]
        history: Option<String>,
    },
    /// Print model artifact metadata and training metrics
    ModelInfo {
        /// Config file path
        #[arg(short, long, default_value = "config/Replenish.toml")]
        config: String,
        /// Model artifact JSON (overrides config)
        #[arg(long)]
        model: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast {
            config,
            stock,
            history,
            errors,
            model,
            items,
            output,
        } => {
            commands::run_forecast(&commands::ForecastArgs {
                config,
                stock,
                history,
                errors,
                model,
                items,
                output,
            })?;
        }
        Commands::Catalog { config, history } => {
            commands::run_catalog(&config, history.as_deref())?;
        }
        Commands::ModelInfo { config, model } => {
            commands::run_model_info(&config, model.as_deref())?;
        }
    }

    Ok(())
}
