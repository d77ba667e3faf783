//! Terminal dashboard. Talks to a running finchat API server over HTTP.

use finchat::adapters::ui::{HttpAdvisorClient, TuiDashboard, init_ui};
use finchat::ports::{AdvisorApi, InputPort};
use finchat::shared::config::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Slack on top of the server's own upstream timeout.
const CLIENT_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    // Prompts own the terminal; keep logs quiet unless RUST_LOG asks otherwise.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = AppConfig::load().unwrap_or_default();
    let api_url = cfg.dashboard_api_url_or_default();
    init_ui(&api_url);

    let client = HttpAdvisorClient::new(api_url, cfg.timeout() + CLIENT_TIMEOUT_SLACK)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let api: Arc<dyn AdvisorApi> = Arc::new(client);
    let dashboard: Arc<dyn InputPort> = Arc::new(TuiDashboard::new(api));

    dashboard
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
