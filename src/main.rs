use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use token_risk_engine::{
    config::Settings,
    models::{ExplanationSource, RiskExplanation, TokenSummary},
    security::{canonicalize_units, PercentUnit, ProviderUnits},
    utils::init_logging,
    AppError, ExplanationService, RiskEngine, RiskResult, TokenData,
};
use tracing::{error, info};

/// Score a token snapshot and explain the result
#[derive(Debug, Parser)]
#[command(name = "token-risk", version, about, long_about = None)]
struct Cli {
    /// TokenData JSON file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Unit the provider uses for top10HoldersPct and deployerHoldingPct
    #[arg(long, value_enum, default_value_t = PercentUnit::Fraction)]
    holder_unit: PercentUnit,

    /// Unit the provider uses for buyTaxPct and sellTaxPct
    #[arg(long, value_enum, default_value_t = PercentUnit::Percent)]
    tax_unit: PercentUnit,
}

impl Cli {
    fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|path| *path != Path::new("-"))
    }

    fn units(&self) -> ProviderUnits {
        ProviderUnits {
            holder_shares: self.holder_unit,
            taxes: self.tax_unit,
        }
    }
}

#[derive(Serialize)]
struct CliOutput {
    result: RiskResult,
    explanation: RiskExplanation,
    explanation_source: ExplanationSource,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("{}", e);
    }

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::ValidationError(message)) => {
            error!("Input rejected: {}", message);
            eprintln!("{}", message);
            ExitCode::from(1)
        }
        Err(e) => {
            error!("token-risk failed: {}", e);
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    let raw = match cli.input_path() {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut data: TokenData = serde_json::from_str(&raw)
        .map_err(|e| AppError::ValidationError(format!("Malformed token data: {}", e)))?;
    canonicalize_units(&mut data, cli.units());

    let engine = RiskEngine::new(settings.to_engine_config())?;
    let explanations = ExplanationService::from_settings(&settings.ai_service)?;

    info!(token = %data.address, chain = %data.chain, "Analyzing token");
    let result = engine.analyze(&data)?;
    let outcome = explanations.explain(&TokenSummary::from(&data), &result).await;

    let output = CliOutput {
        result,
        explanation: outcome.explanation,
        explanation_source: outcome.source,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
