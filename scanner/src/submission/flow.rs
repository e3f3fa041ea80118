use anyhow::Context;
use dermacore::detection::{side_channel, DetectionsPayload, SideChannel, UploadPayload};
use dermacore::prelude::{distinct_classes, recommend, FlowMetrics, SubmissionLog};
use dermacore::{Detection, TreatmentMap};
use reqwest::multipart::{Form, Part};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::submission::handle::AnnotatedImage;
use crate::submission::settings::{join_url, ClientSettings};

/// Response header carrying detections alongside the annotated image body.
pub const DETECTIONS_HEADER: &str = "x-detections";

/// A photo read once and reused by every round-trip of one submission.
pub struct PhotoPayload {
    bytes: Vec<u8>,
    filename: String,
}

impl PhotoPayload {
    /// Reads the photo; an empty file yields `None` since there is nothing
    /// to submit.
    pub fn from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        let bytes =
            fs::read(path).with_context(|| format!("reading photo {}", path.display()))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();
        Ok(Some(Self { bytes, filename }))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    fn to_form(&self) -> Form {
        Form::new().part(
            "file",
            Part::bytes(self.bytes.clone()).file_name(self.filename.clone()),
        )
    }
}

/// Final state of one successful submission, handed off to the results view.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub detections: Vec<Detection>,
    pub classes: Vec<String>,
    pub recommendations: Vec<String>,
    pub annotated: Option<AnnotatedImage>,
}

/// Drives the one-or-two round-trip conversation with the detection service.
pub struct SubmissionFlow {
    client: reqwest::Client,
    settings: ClientSettings,
    log: SubmissionLog,
    metrics: FlowMetrics,
}

impl SubmissionFlow {
    pub fn new(settings: ClientSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("building detection service client")?;
        Ok(Self {
            client,
            settings,
            log: SubmissionLog::new("submission"),
            metrics: FlowMetrics::new(),
        })
    }

    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// Primary route: request the annotated image, read the detections
    /// side-channel, and fall back to the plain JSON endpoint only when the
    /// side-channel yields nothing.
    pub async fn submit(
        &self,
        photo: &PhotoPayload,
        map: &TreatmentMap,
    ) -> anyhow::Result<SubmissionOutcome> {
        self.metrics.record_submission();
        let result = self.run_annotated(photo, map).await;
        if let Err(err) = &result {
            self.metrics.record_failure();
            self.log.failure(&format!("submission aborted: {err:#}"));
        }
        result
    }

    /// Alternate route: the one-shot upload endpoint that replies with
    /// detections plus a link to the processed image.
    pub async fn submit_via_upload(
        &self,
        photo: &PhotoPayload,
        map: &TreatmentMap,
    ) -> anyhow::Result<SubmissionOutcome> {
        self.metrics.record_submission();
        let result = self.run_upload(photo, map).await;
        if let Err(err) = &result {
            self.metrics.record_failure();
            self.log.failure(&format!("upload aborted: {err:#}"));
        }
        result
    }

    async fn run_annotated(
        &self,
        photo: &PhotoPayload,
        map: &TreatmentMap,
    ) -> anyhow::Result<SubmissionOutcome> {
        self.log
            .record(&format!("submitting photo ({} bytes)", photo.len()));

        let response = self
            .client
            .post(self.settings.endpoint("/detect?return_annotated=true"))
            .multipart(photo.to_form())
            .send()
            .await
            .context("posting annotated detection request")?
            .error_for_status()
            .context("annotated detection request rejected")?;

        // The header must be captured before the body consumes the response.
        let header = response
            .headers()
            .get(DETECTIONS_HEADER)
            .map(|value| value.as_bytes().to_vec());
        let body = response
            .bytes()
            .await
            .context("reading annotated image body")?;
        let annotated = AnnotatedImage::from_bytes(&body).context("staging annotated image")?;

        let detections = match side_channel::decode(header.as_deref()) {
            SideChannel::Decoded(detections) if !detections.is_empty() => {
                self.log.record(&format!(
                    "side-channel carried {} detections",
                    detections.len()
                ));
                detections
            }
            SideChannel::Malformed(err) => {
                self.log
                    .recovered(&format!("side-channel unreadable ({err}), falling back"));
                self.fetch_detections(photo).await?
            }
            SideChannel::Absent | SideChannel::Decoded(_) => {
                self.log.record("side-channel empty, falling back");
                self.fetch_detections(photo).await?
            }
        };

        Ok(self.finish(detections, Some(annotated), map))
    }

    /// Second round-trip of the primary route; its result is final even when
    /// it is empty.
    async fn fetch_detections(&self, photo: &PhotoPayload) -> anyhow::Result<Vec<Detection>> {
        self.metrics.record_fallback();
        let body = self
            .client
            .post(self.settings.endpoint("/detect"))
            .multipart(photo.to_form())
            .send()
            .await
            .context("posting detection request")?
            .error_for_status()
            .context("detection request rejected")?
            .text()
            .await
            .context("reading detection response")?;
        let payload = DetectionsPayload::decode(&body).context("decoding detection response")?;
        self.log.record(&format!(
            "fallback returned {} detections",
            payload.detections.len()
        ));
        Ok(payload.detections)
    }

    async fn run_upload(
        &self,
        photo: &PhotoPayload,
        map: &TreatmentMap,
    ) -> anyhow::Result<SubmissionOutcome> {
        self.log
            .record(&format!("uploading photo ({} bytes)", photo.len()));

        let payload: UploadPayload = self
            .client
            .post(self.settings.endpoint("/upload/"))
            .multipart(photo.to_form())
            .send()
            .await
            .context("posting upload request")?
            .error_for_status()
            .context("upload request rejected")?
            .json()
            .await
            .context("decoding upload response")?;

        let annotated = match &payload.image_url {
            Some(image_url) => Some(self.fetch_image(image_url).await?),
            None => None,
        };
        self.log.record(&format!(
            "upload returned {} detections",
            payload.detections.len()
        ));

        Ok(self.finish(payload.detections, annotated, map))
    }

    async fn fetch_image(&self, image_url: &str) -> anyhow::Result<AnnotatedImage> {
        let url = join_url(&self.settings.api_base, image_url);
        let bytes = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fetching processed image {url}"))?
            .error_for_status()
            .with_context(|| format!("processed image request rejected: {url}"))?
            .bytes()
            .await
            .context("reading processed image body")?;
        AnnotatedImage::from_bytes(&bytes).context("staging processed image")
    }

    fn finish(
        &self,
        detections: Vec<Detection>,
        annotated: Option<AnnotatedImage>,
        map: &TreatmentMap,
    ) -> SubmissionOutcome {
        let classes = distinct_classes(&detections);
        let recommendations = recommend(map, &classes);
        SubmissionOutcome {
            detections,
            classes,
            recommendations,
            annotated,
        }
    }
}
