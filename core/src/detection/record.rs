use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One region of interest returned by the detection service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    #[serde(rename = "class")]
    pub class_id: u32,
    pub class_name: String,
}

impl Detection {
    pub fn new(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        confidence: f32,
        class_id: u32,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class_id,
            class_name: class_name.into(),
        }
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).abs()
    }
}

/// Failure to decode a detections payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid detections JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The `{"detections": [...]}` wire shape.
///
/// Both the response side-channel header and the plain detection endpoint
/// carry this shape, so both decode through the same implementation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionsPayload {
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl DetectionsPayload {
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        Self::decode_bytes(raw.as_bytes())
    }

    pub fn decode_bytes(raw: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// Response of the one-shot upload endpoint: detections plus a server-side
/// path to the processed image, when the service produced one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadPayload {
    #[serde(default)]
    pub detections: Vec<Detection>,
    pub image_url: Option<String>,
}
