use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    slotti::startup::init_logging()?;

    info!("Starting slotti");

    // Load configuration
    let config = slotti::startup::load_config().await?;

    // Run the workflow
    slotti::startup::run(config).await
}
