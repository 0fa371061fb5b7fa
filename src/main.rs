mod models;
mod handlers;
mod client;
mod prompt;
mod logger;
mod metrics;

use axum::{routing::{get, post, Router}};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use client::{HttpGenerationClient, TextGeneration};
use metrics::Metrics;

// share the generation client and metrics with all the handlers.
// The client wraps one reqwest::Client created at startup and
// reused for every request.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGeneration>,
    pub metrics: Arc<Metrics>
}

#[tokio::main]
async fn main() {

    dotenvy::dotenv().ok();

    let endpoint_url = std::env::var("GENERATION_API_URL")
        .expect("GENERATION_API_URL must be set");

    let api_key = std::env::var("GENERATION_API_KEY").ok();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // create app state
    let state = AppState {
        generator: Arc::new(HttpGenerationClient::new(endpoint_url, api_key)),
        metrics: Arc::new(Metrics::new())
    };

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route(
            "/chat",
            post(handlers::chat_handler).options(handlers::preflight_handler)
        )
        .with_state(state); // share the app state

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let listener = TcpListener::bind(addr).await
        .expect("Failed to bind to port");
    println!("listening on {}", listener.local_addr()
        .expect("Failed to get local address"));
    axum::serve(listener, app).await
        .expect("Server failed");

}
