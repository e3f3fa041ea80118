use std::sync::Mutex;

/// Counters for the submission flow: total submissions, how often the
/// fallback round-trip fired, and how many submissions failed outright.
pub struct FlowMetrics {
    inner: Mutex<Counters>,
}

struct Counters {
    submissions: usize,
    fallbacks: usize,
    failures: usize,
}

impl FlowMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                submissions: 0,
                fallbacks: 0,
                failures: 0,
            }),
        }
    }

    pub fn record_submission(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.submissions += 1;
        }
    }

    pub fn record_fallback(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.fallbacks += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.failures += 1;
        }
    }

    /// (submissions, fallbacks, failures)
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(counters) = self.inner.lock() {
            (counters.submissions, counters.fallbacks, counters.failures)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for FlowMetrics {
    fn default() -> Self {
        Self::new()
    }
}
