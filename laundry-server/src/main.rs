use laundry_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 1. Environment (.env, logging)
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    setup_environment(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Laundry server starting..."
    );

    // 2. Open the store and wire services
    let state = ServerState::initialize(&config).await?;

    // 3. Serve HTTP until Ctrl+C
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
