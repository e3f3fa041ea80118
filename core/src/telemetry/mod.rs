pub mod log;
pub mod metrics;

pub use log::SubmissionLog;
pub use metrics::FlowMetrics;
