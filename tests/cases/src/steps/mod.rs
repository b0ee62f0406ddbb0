use election_modules::{FixedBackoff, MemoryCoordinationService};
use std::thread;
use std::time::Duration;
use zk_election::{ElectionPath, DEFAULT_ELECTION_ROOT};

pub mod candidates;

pub fn sleep_ms(milliseconds: u64) {
    thread::sleep(Duration::from_millis(milliseconds));
}

pub fn get_notification_timeout() -> Duration {
    Duration::from_millis(2000)
}

pub fn get_backoff() -> FixedBackoff {
    FixedBackoff::new(10)
}

pub fn create_service() -> MemoryCoordinationService {
    let service = MemoryCoordinationService::new();
    service.create_namespace(DEFAULT_ELECTION_ROOT);

    service
}

pub fn full_path(name: &str) -> String {
    format!("{}/{}", ElectionPath::default().root(), name)
}
