//! CLI interface for bp-predictor

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::model::trainer;
use crate::predictor::Predictor;
use crate::server;

#[derive(Parser)]
#[command(name = "bp-predictor")]
#[command(about = "Blood-pressure prediction service with incremental retraining", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (default when no command given)
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Retrain both models from the dataset file and print the scores
    Train,
    /// Predict blood pressure for one set of features
    Predict {
        /// Workday code
        #[arg(long)]
        workday: f64,
        /// Stress level
        #[arg(long)]
        stress_levels: f64,
        /// Sleep quality
        #[arg(long)]
        sleep_quality: f64,
        /// Tiredness level
        #[arg(long)]
        tiredness: f64,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::start(config).await
        }
        Commands::Train => {
            let report = trainer::retrain(&config)?;
            println!(
                "Models retrained on {} rows ({} held out).",
                report.train_rows, report.test_rows
            );
            if let (Some(upper), Some(lower)) = (&report.upper, &report.lower) {
                println!("  Upper_BP  MSE {:.3}  R² {:.3}", upper.mse, upper.r2);
                println!("  Lower_BP  MSE {:.3}  R² {:.3}", lower.mse, lower.r2);
            }
            Ok(())
        }
        Commands::Predict {
            workday,
            stress_levels,
            sleep_quality,
            tiredness,
        } => {
            let predictor = Predictor::new(&config.storage);
            let (upper, lower) = predictor.predict(workday, stress_levels, sleep_quality, tiredness)?;
            println!("Upper_BP: {:.1}", upper);
            println!("Lower_BP: {:.1}", lower);
            Ok(())
        }
    }
}
