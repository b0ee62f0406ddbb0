use rand::Rng;
use std::time::Duration;
use zk_election::Backoff;

const MAX_BACKOFF_DOUBLINGS: u32 = 5;

/// Random pause within a range, doubled on every further attempt up to a cap.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RandomizedBackoff {
    range_start_ms: u64,
    range_stop_ms: u64,
}

impl RandomizedBackoff {
    /// Creates new RandomizedBackoff with time range in milliseconds.
    pub fn new(range_start_ms: u64, range_stop_ms: u64) -> RandomizedBackoff {
        if range_start_ms >= range_stop_ms {
            panic!(
                "Invalid params: range_start_ms : {}, range_stop_ms : {}",
                range_start_ms, range_stop_ms
            )
        }
        RandomizedBackoff {
            range_start_ms,
            range_stop_ms,
        }
    }
}

impl Backoff for RandomizedBackoff {
    fn next_backoff_timeout(&self, attempt: u32) -> Duration {
        let mut rng = rand::thread_rng();
        let base_ms = rng.gen_range(self.range_start_ms, self.range_stop_ms);

        let doublings = attempt.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);

        Duration::from_millis(base_ms << doublings)
    }
}
