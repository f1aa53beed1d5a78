use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_client::HttpApiClient;
use clinic_core::constants::{ENV_API_BASE_URL, ENV_DATA_DIR};
use clinic_core::{CoreConfig, FileSessionStore, SessionContext};

mod shell;

use shell::Shell;

/// Main entry point for the interactive clinic client
///
/// Resolves configuration, restores the saved session and then runs the screen stack,
/// reading one command per line from stdin until `quit` or end of input.
///
/// # Environment Variables
/// - `CLINIC_API_BASE_URL`: API base URL (default: "http://192.168.1.130:8080/api/v1")
/// - `CLINIC_DATA_DIR`: Directory holding `session.json` (default: ".clinic")
/// - `RUST_LOG`: log filter; logs go to stderr
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = CoreConfig::from_env_values(
        std::env::var(ENV_API_BASE_URL).ok(),
        std::env::var(ENV_DATA_DIR).ok(),
    )?;
    tracing::info!("++ Using clinic API at {}", cfg.api_base_url());

    let session = SessionContext::load(Box::new(FileSessionStore::new(cfg.session_file())))?;
    let api = HttpApiClient::new(cfg.api_base_url());

    let mut shell = Shell::new(&api, session);
    shell.enter().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !shell.handle(&line).await {
            break;
        }
    }

    Ok(())
}
