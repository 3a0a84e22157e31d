//! Background network jobs and the channel that carries their results.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;

use crate::prediction_api::{
    FeaturePayload, Metadata, MetadataError, PredictError, PredictionResult, PredictionService,
};

/// Shared handle to the prediction backend.
pub(crate) type SharedService = Arc<dyn PredictionService + Send + Sync>;

pub(crate) enum JobMessage {
    MetadataLoaded(Result<Metadata, MetadataError>),
    PredictionFinished(PredictionJobResult),
}

pub(crate) struct PredictionJobResult {
    /// Submission generation the request was started for.
    pub(crate) generation: u64,
    pub(crate) result: Result<PredictionResult, PredictError>,
}

pub(crate) struct ControllerJobs {
    tx: Sender<JobMessage>,
    rx: Receiver<JobMessage>,
}

impl ControllerJobs {
    pub(crate) fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub(crate) fn begin_metadata_load(&self, service: SharedService) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = service.fetch_metadata();
            let _ = tx.send(JobMessage::MetadataLoaded(result));
        });
    }

    pub(crate) fn begin_prediction(
        &self,
        service: SharedService,
        generation: u64,
        features: FeaturePayload,
    ) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = service.predict(&features);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult {
                generation,
                result,
            }));
        });
    }

    pub(crate) fn try_recv(&self) -> Option<JobMessage> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
