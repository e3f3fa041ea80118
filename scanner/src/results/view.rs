use crate::results::model::ResultsModel;

const DISCLAIMER: &str = "Automated screening is not medical advice; consult a dermatologist.";

/// Formats a results view for the terminal.
pub fn render(model: &ResultsModel) -> String {
    let mut out = String::new();

    if let Some(path) = &model.image {
        out.push_str(&format!("Processed image: {}\n", path.display()));
    }

    if !model.has_detections() {
        out.push_str("No conditions were detected in this photo.\n");
        out.push_str(DISCLAIMER);
        out.push('\n');
        return out;
    }

    out.push_str("Detections:\n");
    for (index, detection) in model.detections.iter().enumerate() {
        out.push_str(&format!(
            "  #{}: {} | confidence {:.0}% | box {:.0}x{:.0} at ({:.0}, {:.0})\n",
            index + 1,
            detection.class_name,
            detection.confidence * 100.0,
            detection.width(),
            detection.height(),
            detection.x1,
            detection.y1,
        ));
    }

    let raw = serde_json::to_string_pretty(&model.detections).unwrap_or_else(|_| "[]".to_string());
    out.push_str("Raw detections:\n");
    out.push_str(&raw);
    out.push('\n');

    out.push_str(&format!("Detected acne types: {}\n", model.acne_types));
    out.push_str(&format!("Suggested treatment: {}\n", model.treatment));

    if !model.recommendations.is_empty() {
        out.push_str("Recommendations (not medical advice):\n");
        for recommendation in &model.recommendations {
            out.push_str(&format!("  - {}\n", recommendation));
        }
    }
    out
}
