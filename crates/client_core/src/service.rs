//! Prediction service seam and its HTTP implementation.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ErrorResponse,
    protocol::{PredictionRequest, PredictionResponse},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const PREDICT_PATH: &str = "api/predict";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid prediction service url '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Sends one request and returns the classification label.
    async fn predict(&self, request: &PredictionRequest) -> Result<String, PredictError>;
}

/// Resolves `{base}/api/predict`, tolerating a trailing slash on the base.
pub fn predict_endpoint(base_url: &str) -> Result<Url, PredictError> {
    let invalid = |source| PredictError::InvalidEndpoint {
        url: base_url.to_string(),
        source,
    };
    let mut base = Url::parse(base_url.trim()).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREDICT_PATH).map_err(invalid)
}

pub struct HttpPredictionService {
    http: Client,
    base_url: String,
}

impl HttpPredictionService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &PredictionRequest) -> Result<String, PredictError> {
        let endpoint = predict_endpoint(&self.base_url)?;
        debug!(%endpoint, ?request, "posting prediction request");

        let response = self.http.post(endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // An unparseable error body is a decode failure; a parsed body
            // without a usable `error` string gets the generic text.
            let body: serde_json::Value = serde_json::from_slice(&body)?;
            let message = serde_json::from_value::<ErrorResponse>(body)
                .ok()
                .and_then(|error| error.message().map(str::to_owned))
                .unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string());
            warn!(status = status.as_u16(), %message, "prediction service rejected request");
            return Err(PredictError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: PredictionResponse = serde_json::from_slice(&body)?;
        Ok(parsed.result)
    }
}
