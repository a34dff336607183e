//! NeuralBet CLI: one-shot NBA stat predictions
//!
//! Runs a single (player, stat) prediction through the same engine the API
//! server uses and prints the result, human-readable or as raw JSON.

use clap::Parser;
use log::{debug, error, info};
use neuralbet_core::{
    PredictionRequest, PredictionResult, PredictorConfig, PredictorEngine, StatCode,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// NeuralBet prediction CLI
///
/// Forecasts a single stat for an NBA player using the external predictor.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Player name, e.g. "LeBron James"
    player: String,

    /// Stat code to predict (PTS, REB, AST, STL, BLK, 3PM, FTM)
    stat: StatCode,

    /// Python interpreter used to run the predictor
    #[arg(long, default_value = "python3", value_name = "BIN")]
    python: PathBuf,

    /// Predictor script path, relative to the resource root
    #[arg(long, default_value = "nba_prediction_api.py", value_name = "FILE")]
    script: PathBuf,

    /// Predictor resource root (working directory for the spawned process)
    #[arg(long, default_value = ".", value_name = "DIR")]
    resources: PathBuf,

    /// Print the raw JSON result instead of the readable summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable verbose logging (use -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("neuralbet-cli v{}", env!("CARGO_PKG_VERSION"));
    debug!("Player: {}", args.player);
    debug!("Stat: {}", args.stat);
    debug!("Python: {:?}", args.python);
    debug!("Script: {:?}", args.script);
    debug!("Resources: {:?}", args.resources);

    let Some(request) = PredictionRequest::new(&args.player, args.stat.as_code()) else {
        error!("Player name must not be blank");
        return ExitCode::FAILURE;
    };

    let engine = PredictorEngine::new(PredictorConfig {
        python: args.python,
        script: args.script,
        resource_root: args.resources,
    });

    let result = engine.predict(&request).await;

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("Failed to render result: {e}");
                return ExitCode::FAILURE;
            }
        }
        return match result {
            PredictionResult::Success(_) => ExitCode::SUCCESS,
            PredictionResult::Failure(_) => ExitCode::FAILURE,
        };
    }

    match result {
        PredictionResult::Success(body) => {
            println!("Prediction for {} ({})", body.player, args.stat.label());
            println!("  prediction:  {:.1}", body.prediction);
            println!("  confidence:  {:.1}%", body.confidence);
            println!("  range:       {:.1} to {:.1}", body.range.min, body.range.max);
            println!("  data points: {}", body.data_points);
            println!("  model MAE:   {:.2}", body.mae);
            ExitCode::SUCCESS
        }
        PredictionResult::Failure(failure) => {
            error!("Prediction failed: {}", failure.error);
            ExitCode::FAILURE
        }
    }
}
