use axum::{Router, routing};
use firmware_notify::handlers::{handle_webhook, root};
use firmware_notify::telegram::TelegramNotifier;
use firmware_notify::{AppState, Config};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt::init();

    let bind_address = format!("0.0.0.0:{}", config.port);
    let notifier = TelegramNotifier::new(config.bot_token.clone(), config.chat_id.clone());
    let state = Arc::new(AppState { config, notifier });

    let app = Router::new()
        .route("/", routing::get(root))
        .route("/webhook", routing::post(handle_webhook))
        .with_state(state);

    info!("Starting webhook server on {}", bind_address);
    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
