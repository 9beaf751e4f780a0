use anyhow::Context;
use tokio::net::TcpListener;

use launch_notifier::configuration::get_configuration;
use launch_notifier::startup::{get_app_state, run};
use launch_notifier::telemetry::{get_subscriber, initialize_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        env!("CARGO_PKG_NAME").to_string(),
        "info".to_string(),
        std::io::stdout,
    );
    initialize_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration")?;
    let app_state = get_app_state(&configuration)?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(%address, "Listening for notification requests");

    run(listener, app_state).await?;

    Ok(())
}
