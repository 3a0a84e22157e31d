//! Blocking client for the prediction service.

use url::Url;

use crate::config::{ApiSettings, ConfigError};
use crate::http_client;

use super::types::{FeaturePayload, Metadata, PredictRequest, PredictionResult};

/// Errors from `GET /metadata`.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("HTTP {0}: {1}")]
    Status(u16, String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Response too large: {0}")]
    TooLarge(String),
}

/// Errors from `POST /predict`.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The service answered with a non-2xx status.
    #[error("HTTP {0}: {1}")]
    Status(u16, String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Response too large: {0}")]
    TooLarge(String),
}

/// The two calls the form controller makes against the backend.
pub trait PredictionService {
    fn fetch_metadata(&self) -> Result<Metadata, MetadataError>;
    fn predict(&self, features: &FeaturePayload) -> Result<PredictionResult, PredictError>;
}

/// HTTP implementation of [`PredictionService`].
#[derive(Clone, Debug)]
pub struct PredictionClient {
    agent: ureq::Agent,
    base_url: Url,
    max_response_bytes: usize,
}

enum Failure {
    Status(u16, String),
    Transport(String),
    Body(std::io::Error),
}

impl PredictionClient {
    /// Build a client from validated API settings.
    pub fn new(settings: &ApiSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::agent(settings),
            base_url: settings.parsed_base_url()?,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    fn read_body(
        &self,
        result: Result<ureq::Response, ureq::Error>,
    ) -> Result<String, Failure> {
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = http_client::read_response_text(response, self.max_response_bytes)
                    .unwrap_or_else(|err| err.to_string());
                return Err(Failure::Status(code, body));
            }
            Err(ureq::Error::Transport(err)) => return Err(Failure::Transport(err.to_string())),
        };
        http_client::read_response_text(response, self.max_response_bytes).map_err(Failure::Body)
    }
}

impl PredictionService for PredictionClient {
    fn fetch_metadata(&self) -> Result<Metadata, MetadataError> {
        let url = self.endpoint("metadata");
        tracing::debug!("GET {url}");
        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call();
        let body = self.read_body(result).map_err(Failure::into_metadata_error)?;
        let metadata: Metadata = serde_json::from_str(body.trim())
            .map_err(|err| MetadataError::Json(format!("{err}: {}", snippet(&body))))?;
        tracing::info!(
            countries = metadata.countries.len(),
            ranges = metadata.ranges.len(),
            status_values = ?metadata.status_values,
            "Loaded metadata"
        );
        Ok(metadata)
    }

    fn predict(&self, features: &FeaturePayload) -> Result<PredictionResult, PredictError> {
        let url = self.endpoint("predict");
        tracing::debug!("POST {url} with {} features", features.len());
        let result = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .send_json(PredictRequest { features });
        let body = self.read_body(result).map_err(Failure::into_predict_error)?;
        parse_prediction(&body)
    }
}

pub(crate) fn parse_prediction(body: &str) -> Result<PredictionResult, PredictError> {
    let result: PredictionResult = serde_json::from_str(body.trim())
        .map_err(|err| PredictError::Json(format!("{err}: {}", snippet(body))))?;
    if let Some(regression) = &result.regression
        && regression.ok
        && regression.life_expectancy.is_none()
    {
        return Err(PredictError::Json(
            "regression marked ok without life_expectancy".to_string(),
        ));
    }
    Ok(result)
}

fn snippet(body: &str) -> &str {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(200) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    }
}

impl Failure {
    fn into_metadata_error(self) -> MetadataError {
        match self {
            Self::Status(code, body) => MetadataError::Status(code, body),
            Self::Transport(message) => MetadataError::Transport(message),
            Self::Body(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                MetadataError::TooLarge(err.to_string())
            }
            Self::Body(err) => MetadataError::Transport(err.to_string()),
        }
    }

    fn into_predict_error(self) -> PredictError {
        match self {
            Self::Status(code, body) => PredictError::Status(code, body),
            Self::Transport(message) => PredictError::Transport(message),
            Self::Body(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                PredictError::TooLarge(err.to_string())
            }
            Self::Body(err) => PredictError::Transport(err.to_string()),
        }
    }
}
