use anyhow::Result;
use evsched::cli::{CliArgs, Command, USAGE};
use evsched::evenergy::{EvEnergyClient, summarize_session};
use evsched::report::SummaryReport;
use evsched::{Config, logging};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to start logging: {}", e))?;

    debug!("*** evsched started (v: {}) ***", evsched::VERSION);

    let outcome = run(&config).await;
    match &outcome {
        Ok(()) => info!("--- evsched exiting with data ---"),
        Err(e) => error!("FATAL ERROR: {}", e),
    }
    logging::shutdown();
    outcome
}

async fn run(config: &Config) -> Result<()> {
    let args = match CliArgs::from_env()? {
        Command::Summarize(args) => args,
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("evsched {}", evsched::VERSION);
            return Ok(());
        }
    };
    debug!(session = args.session_id.get(), "arguments accepted");

    let client = EvEnergyClient::new(args.token, &config.api)?;
    let summary = summarize_session(&client, args.session_id).await?;

    let report = SummaryReport::from_summary(&summary, &config.output)?;
    let json = report.to_json(config.output.pretty)?;
    debug!("{}", json);
    // Stdout is the only channel the calling sensor reads
    println!("{}", json);
    Ok(())
}
