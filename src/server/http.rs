//! HTTP request handlers.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::data::record::records_from_json;
use crate::data::store::DatasetStore;
use crate::error::Error;
use crate::model::store::ModelStore;
use crate::model::trainer::{self, TrainingReport};
use crate::predictor::Predictor;
use crate::server::ServerState;

/// Prediction request: the four lifestyle features
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub workday: f64,
    pub stress_levels: f64,
    pub sleep_quality: f64,
    pub tiredness: f64,
}

/// Prediction response, keyed like the dataset label columns
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(rename = "Upper_BP")]
    pub upper_bp: f64,
    #[serde(rename = "Lower_BP")]
    pub lower_bp: f64,
}

/// Plain success message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Retrain success message plus held-out evaluation scores
#[derive(Debug, Serialize)]
pub struct RetrainResponse {
    pub message: String,
    pub metrics: TrainingReport,
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub dataset_rows: usize,
    pub models_trained: bool,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log before converting; the response only carries the message
        error!("request failed: {}", self);

        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// POST /predict
pub async fn predict_handler(
    State(state): State<ServerState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, Error> {
    let predictor = Predictor::new(&state.config.storage);

    let (upper_bp, lower_bp) = tokio::task::spawn_blocking(move || {
        predictor.predict(req.workday, req.stress_levels, req.sleep_quality, req.tiredness)
    })
    .await
    .map_err(|e| Error::Internal(e.to_string()))??;

    Ok(Json(PredictResponse { upper_bp, lower_bp }))
}

/// POST /add_data
///
/// Body must be a JSON array of record objects carrying all six dataset
/// columns.
pub async fn add_data_handler(
    State(state): State<ServerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<MessageResponse>, Error> {
    let rows = body
        .as_array()
        .ok_or_else(|| Error::InvalidPayload("input data must be a list of records".to_string()))?;
    let records = records_from_json(rows)?;
    let added = records.len();

    let _guard = state.write_lock.lock().await;
    let store = DatasetStore::new(&state.config.storage.dataset_path);
    let total = tokio::task::spawn_blocking(move || store.append(&records))
        .await
        .map_err(|e| Error::Internal(e.to_string()))??;

    info!(added, total, "dataset updated");
    Ok(Json(MessageResponse {
        message: "Data added successfully.".to_string(),
    }))
}

/// POST /retrain
pub async fn retrain_handler(
    State(state): State<ServerState>,
) -> Result<Json<RetrainResponse>, Error> {
    let _guard = state.write_lock.lock().await;

    let config = state.config.clone();
    let report = tokio::task::spawn_blocking(move || trainer::retrain(&config))
        .await
        .map_err(|e| Error::Internal(e.to_string()))??;

    info!(
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        "models retrained"
    );
    Ok(Json(RetrainResponse {
        message: "Model retrained successfully.".to_string(),
        metrics: report,
    }))
}

/// GET /status
pub async fn status_handler(State(state): State<ServerState>) -> Json<StatusResponse> {
    let dataset = DatasetStore::new(&state.config.storage.dataset_path);
    let models = ModelStore::new(&state.config.storage);

    Json(StatusResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        dataset_rows: dataset.row_count(),
        models_trained: models.is_trained(),
    })
}
