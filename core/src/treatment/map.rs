use std::collections::HashMap;

const STANDARD_TREATMENTS: &[(&str, &str)] = &[
    ("Whiteheads", "Topical retinoid or benzoyl peroxide"),
    ("Blackheads", "Salicylic acid or retinoid"),
    ("Papules", "Topical antibiotics or benzoyl peroxide"),
    ("Pustules", "Topical antibiotics or oral antibiotics"),
    ("Nodules", "Oral antibiotics or isotretinoin (derm-supervised)"),
    ("Cysts", "Oral antibiotics or isotretinoin (derm-supervised)"),
    (
        "Post-Inflammatory Hyperpigmentation",
        "Topical azelaic acid/retinoids; consider lasers/peels (derm)",
    ),
    ("Scarring", "Resurfacing/lasers/microneedling; dermatology consult"),
];

const GENERIC_FALLBACK: &str = "General skincare; consider derm consult";

/// Class-name to treatment lookup.
///
/// Built once at startup and handed to the resolver by reference; lookups of
/// classes the map does not know return the generic fallback line.
#[derive(Debug, Clone)]
pub struct TreatmentMap {
    entries: HashMap<String, String>,
    fallback: String,
}

impl TreatmentMap {
    pub fn new(
        entries: impl IntoIterator<Item = (String, String)>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            fallback: fallback.into(),
        }
    }

    /// The built-in table for the acne condition classes the service reports.
    pub fn standard() -> Self {
        Self::new(
            STANDARD_TREATMENTS
                .iter()
                .map(|(class, treatment)| (class.to_string(), treatment.to_string())),
            GENERIC_FALLBACK,
        )
    }

    pub fn lookup(&self, class_name: &str) -> &str {
        self.entries
            .get(class_name)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TreatmentMap {
    fn default() -> Self {
        Self::standard()
    }
}
