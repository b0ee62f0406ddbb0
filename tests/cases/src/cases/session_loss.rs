use crate::steps;
use crate::steps::candidates;
use zk_election::{CandidateStatus, Role};

/// Session loss clears the election state and signals the caller; the survivors
/// re-elect among themselves.
pub fn run() {
    let service = steps::create_service();
    let cluster = candidates::start_candidates(&service, 2);

    cluster[0].client.disconnect();
    let reason = cluster[0].wait_for_session_lost();
    info!("--Session lost: {}", reason);

    let status = cluster[0].worker.status();
    assert_eq!(CandidateStatus::SessionLost, status.status);
    assert_eq!(Role::Unresolved, status.role);
    assert!(status.candidate_id.is_none());
    assert!(status.leader_id.is_none());

    // a disconnected entry lingers until the session is replaced
    assert_eq!(Role::Follower, cluster[1].role());

    cluster[0].client.reconnect();
    cluster[1].wait_for_role(Role::Leader);
    steps::sleep_ms(100);

    // no re-registration without rejoin
    assert_eq!(CandidateStatus::Unregistered, cluster[0].worker.status().status);
    assert_eq!(1, service.children("/election").len());

    candidates::terminate_all(cluster);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_session_loss() {
        crate::cases::session_loss::run()
    }
}
