use crate::prediction_api::{FeaturePayload, PredictError, PredictionResult, PredictionService};

use super::features::collect_features;
use super::format;
use super::messages;
use super::view::{FormView, ResultPanel};

/// Outcome of the validation step of a submission.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitStart {
    /// No country selected; nothing is sent.
    Rejected,
    /// Payload ready for `POST /predict`.
    Ready(FeaturePayload),
}

/// Terminal state of one submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected,
    /// The API answered; each model result rendered on its own.
    Rendered,
    /// HTTP or transport failure; all results show the same error.
    Failed,
}

/// Show the pending placeholders, collect the payload and validate it.
pub fn begin_submit(view: &mut FormView) -> SubmitStart {
    view.results = ResultPanel::uniform(messages::CALCULATING);
    view.global_message.clear();

    let features = collect_features(view);
    if !features.has_value("Country") {
        view.global_message = messages::SELECT_COUNTRY.to_string();
        return SubmitStart::Rejected;
    }
    SubmitStart::Ready(features)
}

/// Render the response of `POST /predict`.
pub fn apply_prediction(
    view: &mut FormView,
    result: Result<PredictionResult, PredictError>,
) -> SubmitOutcome {
    match result {
        Ok(prediction) => {
            render_prediction(view, &prediction);
            SubmitOutcome::Rendered
        }
        Err(PredictError::Status(code, body)) => {
            tracing::warn!("Prediction request rejected with HTTP {code}: {body}");
            view.results = ResultPanel::uniform(messages::CALCULATION_FAILED);
            view.global_message = messages::REQUEST_FAILED.to_string();
            SubmitOutcome::Failed
        }
        Err(err) => {
            tracing::warn!("Prediction request failed: {err}");
            view.results = ResultPanel::uniform(messages::CONNECTION_ERROR);
            view.global_message = messages::API_UNREACHABLE.to_string();
            SubmitOutcome::Failed
        }
    }
}

/// Validate, submit and render in one blocking call.
pub fn handle_submit<S>(view: &mut FormView, service: &S) -> SubmitOutcome
where
    S: PredictionService + ?Sized,
{
    match begin_submit(view) {
        SubmitStart::Rejected => SubmitOutcome::Rejected,
        SubmitStart::Ready(features) => apply_prediction(view, service.predict(&features)),
    }
}

/// Clear the form and restore the result placeholders.
pub fn reset_form(view: &mut FormView) {
    view.reset_controls();
    view.results = ResultPanel::placeholder();
    view.global_message.clear();
}

fn render_prediction(view: &mut FormView, prediction: &PredictionResult) {
    log_model_errors(prediction);
    view.results.regression = match prediction.life_expectancy() {
        Some(value) => format::life_expectancy(value),
        None => messages::PREDICTION_UNAVAILABLE.to_string(),
    };
    view.results.knn = prediction
        .knn_category()
        .map(str::to_string)
        .unwrap_or_else(|| messages::CLASSIFICATION_UNAVAILABLE.to_string());
    view.results.mlp = prediction
        .mlp_category()
        .map(str::to_string)
        .unwrap_or_else(|| messages::CLASSIFICATION_UNAVAILABLE.to_string());
}

fn log_model_errors(prediction: &PredictionResult) {
    let errors = [
        ("regression", prediction.regression.as_ref().and_then(|r| r.error.as_deref())),
        ("knn", prediction.knn.as_ref().and_then(|c| c.error.as_deref())),
        ("mlp", prediction.mlp.as_ref().and_then(|c| c.error.as_deref())),
    ];
    for (model, error) in errors {
        if let Some(error) = error {
            tracing::warn!(model, "Model reported an error: {error}");
        }
    }
}
