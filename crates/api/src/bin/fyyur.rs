use anyhow::Context;

use crudkit_api::app::fyyur_app;
use crudkit_api::config::ApiConfig;
use crudkit_api::context::BookingContext;
use crudkit_api::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env(8081).context("invalid configuration")?;
    crudkit_observability::init(config.log_format);
    tracing::info!(app = "fyyur", "starting");

    let ctx = BookingContext::from_config(&config)
        .await
        .context("failed to open the store")?;

    server::serve(fyyur_app(ctx), config.bind_addr).await?;
    Ok(())
}
