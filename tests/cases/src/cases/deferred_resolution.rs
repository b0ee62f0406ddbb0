use crate::steps;
use crate::steps::candidates;
use zk_election::{ElectionLimits, Role};

/// A follower whose resolution attempts run out while it takes over still becomes the
/// leader after the deferred retry. A follower that never gets an answer fails with the
/// terminal signal instead of stalling.
pub fn run() {
    takeover_after_deferred_retry();
    unreachable_service_fails_the_election();
}

fn takeover_after_deferred_retry() {
    let service = steps::create_service();
    let cluster = candidates::start_candidates(&service, 2);

    let limits = ElectionLimits::default();
    cluster[1].client.fail_next_calls(limits.max_resolve_attempts + 1);
    cluster[0].client.expire_session();

    let status = cluster[1].wait_for_role(Role::Leader);
    assert_eq!(Some(cluster[1].id()), status.leader_id);
    assert_eq!(
        vec![cluster[1].id().name().to_string()],
        service.children(zk_election::DEFAULT_ELECTION_ROOT)
    );

    candidates::terminate_all(cluster);
}

fn unreachable_service_fails_the_election() {
    let service = steps::create_service();
    let limits = ElectionLimits {
        max_resolve_attempts: 2,
        max_deferred_resolutions: 2,
        ..ElectionLimits::default()
    };
    let leader = candidates::start_candidate(&service);
    let follower = candidates::start_candidate_with_limits(&service, limits);

    follower.client.fail_next_calls(u32::max_value());
    leader.client.expire_session();

    let reason = follower.wait_for_session_lost();
    info!("--Follower gave up: {}", reason);

    let status = follower.worker.status();
    assert_eq!(Role::Unresolved, status.role);
    assert!(status.leader_id.is_none());

    follower.terminate();
    leader.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_deferred_resolution() {
        crate::cases::deferred_resolution::run()
    }
}
