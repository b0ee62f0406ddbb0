use std::time::Duration;

/// Pause policy between transient resolution failures.
pub trait Backoff: Send + 'static {
	/// Returns the pause before the next attempt. `attempt` starts from 1.
	fn next_backoff_timeout(&self, attempt: u32) -> Duration;
}
