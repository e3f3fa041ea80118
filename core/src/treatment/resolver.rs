use std::collections::HashSet;
use std::hash::Hash;

use crate::detection::Detection;
use crate::treatment::map::TreatmentMap;

/// Removes duplicates while keeping the first occurrence of each item.
pub fn dedupe_preserve_order<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Distinct class names across a detection list, in first-seen order.
pub fn distinct_classes(detections: &[Detection]) -> Vec<String> {
    dedupe_preserve_order(detections.iter().map(|d| d.class_name.clone()))
}

/// Maps class names to treatment lines.
///
/// Input classes are deduplicated first, then the mapped output is
/// deduplicated again so two classes sharing a treatment produce one line.
/// The result is therefore never longer than the distinct class list.
pub fn recommend(map: &TreatmentMap, class_names: &[String]) -> Vec<String> {
    let classes = dedupe_preserve_order(class_names.iter().cloned());
    dedupe_preserve_order(classes.iter().map(|class| map.lookup(class).to_string()))
}
