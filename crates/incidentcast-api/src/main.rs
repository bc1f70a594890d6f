use incidentcast_api::{setup, state, telemetry};
use incidentcast_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env if present, then configuration
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = Config::from_env()?;

    let app_state = state::AppState::from_config(config.clone())?;
    let router = setup::routes::setup_routes(&config, app_state)?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
