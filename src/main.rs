use anyhow::{Context, Result};
use traveller_agent::api::AppState;
use traveller_agent::{AgentConfig, TripPlanner, llm, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AgentConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!("Starting traveller agent v{}", traveller_agent::VERSION);
    match &config.source {
        Some(path) => tracing::info!("Using configuration from {}", path.display()),
        None => tracing::info!("No configuration file found, using defaults and environment"),
    }

    let model = llm::from_config(&config.llm)?;
    let planner = TripPlanner::new(model, config.planner.currency_symbol.clone());

    web::run(AppState::new(planner), &config.server).await
}
