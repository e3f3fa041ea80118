//! Convenience re-exports of the names the client crates use most.

pub use crate::detection::{DecodeError, Detection, DetectionsPayload, SideChannel, UploadPayload};
pub use crate::telemetry::{FlowMetrics, SubmissionLog};
pub use crate::treatment::{dedupe_preserve_order, distinct_classes, recommend, TreatmentMap};
