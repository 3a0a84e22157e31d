//! Controller bridging the form operations to the egui renderer.
//!
//! Network calls run on worker threads; results are applied on the UI thread
//! by [`PanelController::poll_jobs`]. Only one prediction request may be in
//! flight at a time.

use std::sync::Arc;

use crate::config::{ConfigError, PanelSettings};
use crate::form::{self, BindError, FormView, SubmitStart};
use crate::prediction_api::{PredictionClient, PredictionService};

use super::jobs::{ControllerJobs, JobMessage, SharedService};

/// Errors raised while building the controller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// What happened to a submit request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitRequest {
    /// A prediction is already pending; the request was dropped.
    Ignored,
    /// No country selected.
    Rejected,
    /// Request sent in the background.
    Sent,
}

/// Holds the bound form and tracks background work.
pub struct PanelController {
    pub view: FormView,
    service: SharedService,
    jobs: ControllerJobs,
    generation: u64,
    in_flight: Option<u64>,
    metadata_loading: bool,
}

impl PanelController {
    /// Build a controller talking to the API configured in `settings`.
    pub fn from_settings(settings: &PanelSettings) -> Result<Self, ControllerError> {
        let client = PredictionClient::new(&settings.api)?;
        tracing::info!("Prediction API at {}", client.base_url());
        let view = FormView::bind(&settings.form)?;
        Ok(Self::new(view, Arc::new(client)))
    }

    pub fn new(view: FormView, service: Arc<dyn PredictionService + Send + Sync>) -> Self {
        Self {
            view,
            service,
            jobs: ControllerJobs::new(),
            generation: 0,
            in_flight: None,
            metadata_loading: false,
        }
    }

    /// Fetch metadata in the background.
    pub fn start_metadata_load(&mut self) {
        if self.metadata_loading {
            return;
        }
        self.metadata_loading = true;
        self.jobs.begin_metadata_load(Arc::clone(&self.service));
    }

    /// Validate the form and, when valid, send it for prediction.
    pub fn submit(&mut self) -> SubmitRequest {
        if self.in_flight.is_some() {
            tracing::debug!("Prediction already pending; ignoring submit");
            return SubmitRequest::Ignored;
        }
        match form::begin_submit(&mut self.view) {
            SubmitStart::Rejected => SubmitRequest::Rejected,
            SubmitStart::Ready(features) => {
                self.generation += 1;
                self.in_flight = Some(self.generation);
                self.jobs
                    .begin_prediction(Arc::clone(&self.service), self.generation, features);
                SubmitRequest::Sent
            }
        }
    }

    /// Reset the form. A pending prediction is abandoned and its result dropped.
    pub fn reset(&mut self) {
        if self.in_flight.take().is_some() {
            tracing::debug!("Reset while a prediction was pending; its result will be dropped");
        }
        form::reset_form(&mut self.view);
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_loading_metadata(&self) -> bool {
        self.metadata_loading
    }

    /// Whether any background job is still running.
    pub fn is_busy(&self) -> bool {
        self.is_submitting() || self.is_loading_metadata()
    }

    /// Apply finished background jobs; returns how many were applied.
    pub fn poll_jobs(&mut self) -> usize {
        let mut applied = 0;
        while let Some(message) = self.jobs.try_recv() {
            match message {
                JobMessage::MetadataLoaded(result) => {
                    self.metadata_loading = false;
                    form::apply_metadata(&mut self.view, result);
                    applied += 1;
                }
                JobMessage::PredictionFinished(job) => {
                    if self.in_flight != Some(job.generation) {
                        tracing::debug!(generation = job.generation, "Dropping stale prediction");
                        continue;
                    }
                    self.in_flight = None;
                    let outcome = form::apply_prediction(&mut self.view, job.result);
                    tracing::info!(?outcome, "Prediction finished");
                    applied += 1;
                }
            }
        }
        applied
    }
}
