use dermacore::TreatmentMap;
use log::warn;
use std::path::PathBuf;

use crate::results::ResultsModel;
use crate::submission::flow::{PhotoPayload, SubmissionFlow, SubmissionOutcome};
use crate::submission::handle::AnnotatedImage;
use crate::submission::settings::ClientSettings;

/// Which conversation shape to use against the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRoute {
    /// Annotated image with the detections side-channel, falling back to the
    /// plain JSON endpoint when the side-channel yields nothing.
    Annotated,
    /// One-shot upload endpoint that links to the processed image.
    Upload,
}

/// State around submissions: the staged photo, the busy flag, and the
/// current annotated-image handle.
pub struct Session {
    flow: SubmissionFlow,
    map: TreatmentMap,
    selected: Option<PathBuf>,
    loading: bool,
    annotated: Option<AnnotatedImage>,
}

impl Session {
    pub fn new(settings: ClientSettings, map: TreatmentMap) -> anyhow::Result<Self> {
        Ok(Self {
            flow: SubmissionFlow::new(settings)?,
            map,
            selected: None,
            loading: false,
            annotated: None,
        })
    }

    /// Stages a photo for the next submission.
    pub fn select(&mut self, path: PathBuf) {
        self.selected = Some(path);
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn annotated(&self) -> Option<&AnnotatedImage> {
        self.annotated.as_ref()
    }

    /// (submissions, fallbacks, failures) recorded so far.
    pub fn metrics_snapshot(&self) -> (usize, usize, usize) {
        self.flow.metrics().snapshot()
    }

    /// Runs one submission; `Ok(None)` means nothing was sent because no
    /// photo was staged, the staged file was empty, or a submission is
    /// already in flight.
    pub async fn submit(&mut self, route: SubmitRoute) -> anyhow::Result<Option<ResultsModel>> {
        if self.loading {
            return Ok(None);
        }
        let path = match self.selected.clone() {
            Some(path) => path,
            None => {
                warn!("no photo selected, nothing submitted");
                return Ok(None);
            }
        };
        let photo = match PhotoPayload::from_path(&path)? {
            Some(photo) => photo,
            None => {
                warn!("{} is empty, nothing submitted", path.display());
                return Ok(None);
            }
        };

        self.loading = true;
        let result = match route {
            SubmitRoute::Annotated => self.flow.submit(&photo, &self.map).await,
            SubmitRoute::Upload => self.flow.submit_via_upload(&photo, &self.map).await,
        };
        self.loading = false;

        let outcome = result?;
        Ok(Some(self.store(outcome)))
    }

    /// Builds the hand-off model, then swaps the stored handle so the
    /// previous submission's image is released.
    fn store(&mut self, outcome: SubmissionOutcome) -> ResultsModel {
        let SubmissionOutcome {
            detections,
            classes,
            recommendations,
            annotated,
        } = outcome;

        let model = ResultsModel::new(
            detections,
            classes,
            recommendations,
            annotated.as_ref().map(|image| image.path().to_path_buf()),
        );
        if let Some(previous) = self.annotated.take() {
            previous.release();
        }
        self.annotated = annotated;
        model
    }

    /// Drops the staged photo and releases the current handle.
    pub fn clear(&mut self) {
        self.selected = None;
        if let Some(handle) = self.annotated.take() {
            handle.release();
        }
    }
}
