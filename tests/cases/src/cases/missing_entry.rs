use crate::steps;
use crate::steps::candidates;
use zk_election::Role;

/// An externally deleted own entry is detected on the next resolution and replaced by a
/// fresh registration.
pub fn run() {
    let service = steps::create_service();
    let cluster = candidates::start_candidates(&service, 3);

    let lost_id = cluster[2].id();
    service.delete_node(&steps::full_path(lost_id.name()));

    cluster[1].client.expire_session();

    let status = cluster[2].wait_for_role(Role::Follower);
    let new_id = status.candidate_id.expect("registered again");
    assert!(new_id.sequence() > lost_id.sequence());
    assert_eq!(Role::Follower, status.role);
    assert_eq!(Some(cluster[0].id()), status.watched_predecessor);
    assert_eq!(2, service.children("/election").len());

    candidates::terminate_all(cluster);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_missing_entry() {
        crate::cases::missing_entry::run()
    }
}
