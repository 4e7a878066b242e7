//! Side-channel observer for generation telemetry.
//!
//! Observers are notified after the fact and return nothing, so they cannot
//! influence control flow or error propagation in the planner.

/// Usage of one completion call, used as a cost proxy for monitoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub latency_ms: u64,
}

/// Why a request was served by the rule-based generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No completion credential configured
    NotConfigured,
    /// Provider call failed (network, auth, rate limit, status)
    ProviderError(String),
    /// Provider did not answer before the deadline
    TimedOut,
    /// Response could not be extracted, decoded or validated
    Rejected(String),
    /// The attempt panicked
    Panicked,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::NotConfigured => write!(f, "model not configured"),
            FallbackReason::ProviderError(e) => write!(f, "provider error: {}", e),
            FallbackReason::TimedOut => write!(f, "provider timed out"),
            FallbackReason::Rejected(e) => write!(f, "response rejected: {}", e),
            FallbackReason::Panicked => write!(f, "model attempt panicked"),
        }
    }
}

pub trait GenerationObserver: Send + Sync {
    fn record_usage(&self, usage: &UsageRecord);
    fn record_fallback(&self, reason: &FallbackReason);
}

/// Default observer: emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn record_usage(&self, usage: &UsageRecord) {
        tracing::info!(
            model = %usage.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            latency_ms = usage.latency_ms,
            "Completion usage"
        );
    }

    fn record_fallback(&self, reason: &FallbackReason) {
        match reason {
            FallbackReason::NotConfigured => {
                tracing::debug!("Serving rule-based plan: {}", reason)
            }
            _ => tracing::warn!("Falling back to rule-based plan: {}", reason),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Observer that keeps every event for assertions.
    #[derive(Default)]
    pub(crate) struct RecordingObserver {
        pub(crate) usage: Mutex<Vec<UsageRecord>>,
        pub(crate) fallbacks: Mutex<Vec<FallbackReason>>,
    }

    impl GenerationObserver for RecordingObserver {
        fn record_usage(&self, usage: &UsageRecord) {
            self.usage.lock().unwrap().push(usage.clone());
        }

        fn record_fallback(&self, reason: &FallbackReason) {
            self.fallbacks.lock().unwrap().push(reason.clone());
        }
    }

    #[test]
    fn test_fallback_reason_display() {
        assert_eq!(FallbackReason::TimedOut.to_string(), "provider timed out");
        assert_eq!(
            FallbackReason::Rejected("days missing".to_string()).to_string(),
            "response rejected: days missing"
        );
    }

    #[test]
    fn test_tracing_observer_never_panics() {
        let observer = TracingObserver;
        observer.record_usage(&UsageRecord {
            model: "gpt-4o-mini".to_string(),
            prompt_tokens: 1,
            completion_tokens: 2,
            latency_ms: 3,
        });
        observer.record_fallback(&FallbackReason::NotConfigured);
        observer.record_fallback(&FallbackReason::TimedOut);
    }
}
