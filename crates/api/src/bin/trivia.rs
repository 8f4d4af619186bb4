use anyhow::Context;

use crudkit_api::app::trivia_app;
use crudkit_api::config::ApiConfig;
use crudkit_api::context::TriviaContext;
use crudkit_api::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env(8082).context("invalid configuration")?;
    crudkit_observability::init(config.log_format);
    tracing::info!(app = "trivia", "starting");

    let ctx = TriviaContext::from_config(&config)
        .await
        .context("failed to open the store")?;

    server::serve(trivia_app(ctx), config.bind_addr).await?;
    Ok(())
}
