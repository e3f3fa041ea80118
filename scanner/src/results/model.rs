use dermacore::Detection;
use std::path::PathBuf;

/// One-shot hand-off from a finished submission to the results view.
///
/// Summary strings are joined up front; when nothing was detected they carry
/// placeholder wording instead of empty text.
#[derive(Debug)]
pub struct ResultsModel {
    pub acne_types: String,
    pub treatment: String,
    pub detections: Vec<Detection>,
    pub recommendations: Vec<String>,
    pub image: Option<PathBuf>,
}

impl ResultsModel {
    pub fn new(
        detections: Vec<Detection>,
        classes: Vec<String>,
        recommendations: Vec<String>,
        image: Option<PathBuf>,
    ) -> Self {
        let acne_types = if classes.is_empty() {
            "Unknown".to_string()
        } else {
            classes.join(", ")
        };
        let treatment = if recommendations.is_empty() {
            "No recommendation available".to_string()
        } else {
            recommendations.join(", ")
        };
        Self {
            acne_types,
            treatment,
            detections,
            recommendations,
            image,
        }
    }

    pub fn has_detections(&self) -> bool {
        !self.detections.is_empty()
    }
}
