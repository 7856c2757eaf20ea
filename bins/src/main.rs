use chrono::Local;
use dotenv::dotenv;
use eyre::Context;
use log::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let dotenv = dotenv();
    pretty_env_logger::init();
    color_eyre::install()?;
    if let Err(err) = dotenv {
        info!("Failed to load .env file: {}", err);
    }

    let env = env::Env::load()?;
    info!("connecting to mongo");
    let storage = storage::Storage::new(env.mongo_url())
        .await
        .context("Failed to create storage")?;
    let ledger = ledger::Ledger::new(storage, env.operating_minutes());

    let today = Local::now().date_naive();
    info!(
        "Building dashboard up to {} ({} min/day)",
        today,
        env.operating_minutes()
    );
    let report = ledger
        .dashboard
        .report_for_request(today, env.dashboard_start(), env.dashboard_end())
        .await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
