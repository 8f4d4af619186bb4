use anyhow::Context;

use crudkit_api::app::coffee_app;
use crudkit_api::config::ApiConfig;
use crudkit_api::context::CoffeeContext;
use crudkit_api::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env(8080).context("invalid configuration")?;
    crudkit_observability::init(config.log_format);
    tracing::info!(app = "coffee-shop", "starting");

    let ctx = CoffeeContext::from_config(&config)
        .await
        .context("failed to open the store")?;

    server::serve(coffee_app(ctx), config.bind_addr).await?;
    Ok(())
}
