use tokio::signal;

use dotenvy::dotenv;

use roster_api::app::create_app;
use roster_api::config::DbConfig;
use roster_api::db::{ConnectionProvider, RetryPolicy};
use roster_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt::init();

  let config = DbConfig::from_env();
  tracing::info!("Using database host: {}", config.host);

  let provider = ConnectionProvider::new(&config, RetryPolicy::default());
  let app_state = SharedAppState::new(provider);
  let app = create_app(app_state);

  let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;

  tracing::info!("Server running on http://0.0.0.0:5000");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
