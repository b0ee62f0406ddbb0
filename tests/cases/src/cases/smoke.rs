use crate::steps;
use crate::steps::candidates;
use zk_election::Role;

/// Candidates A, B, C register in order. Leadership moves along the chain as the
/// sessions of the leaders expire.
pub fn run() {
    let service = steps::create_service();
    let cluster = candidates::start_candidates(&service, 3);

    let (a, b, c) = (&cluster[0], &cluster[1], &cluster[2]);
    assert_eq!(Role::Leader, a.role());
    assert_eq!(Role::Follower, b.role());
    assert_eq!(Role::Follower, c.role());
    assert_eq!(Some(a.id()), b.watched_predecessor());
    assert_eq!(Some(b.id()), c.watched_predecessor());

    let b_id = b.id();
    a.client.expire_session();
    a.wait_for_session_lost();

    let status = b.wait_for_role(Role::Leader);
    assert_eq!(Some(b_id.clone()), status.leader_id);
    assert!(status.watched_predecessor.is_none());

    // C still watches B
    assert_eq!(Role::Follower, c.role());
    assert_eq!(Some(b_id), c.watched_predecessor());

    b.client.expire_session();
    let status = c.wait_for_role(Role::Leader);
    assert_eq!(Some(c.id()), status.leader_id);

    candidates::terminate_all(cluster);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_smoke() {
        crate::cases::smoke::run()
    }
}
