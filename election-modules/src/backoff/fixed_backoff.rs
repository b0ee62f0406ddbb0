use std::time::Duration;
use zk_election::Backoff;

/// Same pause before every retry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FixedBackoff {
    fixed_duration_ms: u64,
}

impl FixedBackoff {
    pub fn new(fixed_duration_ms: u64) -> FixedBackoff {
        FixedBackoff { fixed_duration_ms }
    }
}

impl Backoff for FixedBackoff {
    fn next_backoff_timeout(&self, _attempt: u32) -> Duration {
        Duration::from_millis(self.fixed_duration_ms)
    }
}
