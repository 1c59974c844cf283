//! Web service wiring: shared state, routes and startup.

pub mod http;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::data::store::DatasetStore;
use crate::model::store::ModelStore;

/// Shared server state, constructed once at startup and handed to every
/// handler.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    /// Serializes dataset and model mutations across requests
    pub write_lock: Arc<Mutex<()>>,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Build the application router.
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(http::predict_handler))
        .route("/add_data", post(http::add_data_handler))
        .route("/retrain", post(http::retrain_handler))
        .route("/status", get(http::status_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server and serve until terminated.
pub async fn start(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let dataset = DatasetStore::new(&config.storage.dataset_path);
    let models = ModelStore::new(&config.storage);

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("     BP Predictor Server Starting");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("✓ Dataset: {} ({} rows)", dataset.path().display(), dataset.row_count());
    if models.is_trained() {
        println!("✓ Models: trained");
    } else {
        println!("⚠ Models: not trained yet (POST /retrain first)");
    }
    println!();
    println!("🚀 Listening on http://{}", addr);
    println!();

    let app = router(ServerState::new(config));
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
