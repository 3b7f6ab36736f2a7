use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the CareDesk backend
///
/// Serves the JSON API (civic guidance, emergency wallet, clinical dashboard) on port 5000
/// and shuts down cleanly on Ctrl-C.
///
/// # Environment Variables
/// - `CAREDESK_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `CAREDESK_DATA_FILE`: JSON record store (default: "data.json")
/// - `CAREDESK_STEP_MINUTES`: vitals sampling interval (default: 30)
///
/// # Returns
/// * `Ok(())` - If the server starts and stops cleanly
/// * `Err(anyhow::Error)` - If startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("caredesk_run=info".parse()?)
                .add_directive("caredesk_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("CAREDESK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    tracing::info!("++ Starting CareDesk REST on {}", rest_addr);

    let app = api_rest::router(api_rest::state_from_env()?);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("CareDesk stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
