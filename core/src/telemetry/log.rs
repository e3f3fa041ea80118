use log::{error, info, warn};

/// Diagnostic log for one submission pipeline, tagged with a scope name.
pub struct SubmissionLog {
    scope: &'static str,
}

impl SubmissionLog {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    /// Normal flow milestones.
    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    /// Conditions recovered without failing the flow, such as an unreadable
    /// side-channel header.
    pub fn recovered(&self, message: &str) {
        warn!("[{}] {}", self.scope, message);
    }

    /// Failures that abort the flow; recorded for diagnostics before the
    /// error propagates.
    pub fn failure(&self, message: &str) {
        error!("[{}] {}", self.scope, message);
    }
}

impl Default for SubmissionLog {
    fn default() -> Self {
        Self::new("submission")
    }
}
