//! Entry point wiring CLI dispatch to the service.

use anyhow::Result;
use article_ai::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    let _log_guard = logging::init_tracing(settings.log_file.as_deref())?;
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
