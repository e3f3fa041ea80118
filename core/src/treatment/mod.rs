pub mod map;
pub mod resolver;

pub use map::TreatmentMap;
pub use resolver::{dedupe_preserve_order, distinct_classes, recommend};
