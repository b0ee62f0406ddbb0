use crate::steps;
use crate::steps::candidates;
use zk_election::{CandidateStatus, CoordinationClient, DEFAULT_CANDIDATE_PREFIX};

/// A lone candidate with a non-zero sequence number leads immediately, no watch armed.
pub fn run() {
    let service = steps::create_service();

    // burn sequence numbers 0..=4 in a session which ends before the candidate starts
    let departed = service.connect();
    for _ in 0..5 {
        departed
            .create_ephemeral_sequential(&format!("/election/{}", DEFAULT_CANDIDATE_PREFIX))
            .expect("created");
    }
    departed.expire_session();

    let candidate = candidates::start_candidate(&service);
    let status = candidate.worker.status();

    assert_eq!(CandidateStatus::Leader, status.status);
    assert_eq!(5, candidate.id().sequence());
    assert_eq!(Some(candidate.id()), status.leader_id);
    assert!(status.watched_predecessor.is_none());
    assert!(candidate.worker.is_leader());

    candidate.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_single_candidate() {
        crate::cases::single_candidate::run()
    }
}
