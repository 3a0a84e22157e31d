//! Wire types and HTTP client for the life-expectancy prediction service.

mod client;
mod types;

pub use client::{MetadataError, PredictError, PredictionClient, PredictionService};
pub use types::{
    ClassificationOutcome, FeaturePayload, FeatureValue, Metadata, PredictRequest,
    PredictionResult, RangeInfo, RegressionOutcome,
};
