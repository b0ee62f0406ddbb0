use crossbeam_channel::Receiver;
use election_modules::{FixedBackoff, MemoryCoordinationClient, MemoryCoordinationService};
use zk_election::{
    CandidateId, ElectionConfiguration, ElectionLimits, ElectionStatus, ElectionWorker, Role,
};

pub struct CaseCandidate {
    pub client: MemoryCoordinationClient,
    pub worker: ElectionWorker,
    pub role_change_rx: Receiver<ElectionStatus>,
    pub session_lost_rx: Receiver<String>,
}

impl CaseCandidate {
    pub fn id(&self) -> CandidateId {
        self.worker
            .status()
            .candidate_id
            .expect("candidate is registered")
    }

    pub fn watched_predecessor(&self) -> Option<CandidateId> {
        self.worker.status().watched_predecessor
    }

    pub fn role(&self) -> Role {
        self.worker.role()
    }

    /// Waits for a role change notification with the expected role, skipping older ones.
    pub fn wait_for_role(&self, role: Role) -> ElectionStatus {
        loop {
            let status = self
                .role_change_rx
                .recv_timeout(super::get_notification_timeout())
                .unwrap_or_else(|_| panic!("no {} notification for {:?}", role, self.worker.status()));

            info!("--Role change: {:?}", status);
            if status.role == role {
                return status;
            }
        }
    }

    /// Asserts no role change arrives within a short period.
    pub fn assert_no_role_change(&self) {
        let result = self
            .role_change_rx
            .recv_timeout(std::time::Duration::from_millis(200));

        if let Ok(status) = result {
            panic!("unexpected role change: {:?}", status);
        }
    }

    pub fn wait_for_session_lost(&self) -> String {
        self.session_lost_rx
            .recv_timeout(super::get_notification_timeout())
            .expect("session lost notification")
    }

    pub fn terminate(self) {
        self.worker.terminate();
        self.worker.join();
    }
}

pub fn start_candidate(service: &MemoryCoordinationService) -> CaseCandidate {
    start_candidate_with_limits(service, ElectionLimits::default())
}

pub fn start_candidate_with_limits(
    service: &MemoryCoordinationService,
    limits: ElectionLimits,
) -> CaseCandidate {
    let client = service.connect();

    let mut config: ElectionConfiguration<MemoryCoordinationClient, FixedBackoff> =
        ElectionConfiguration::new(client.clone(), super::get_backoff());
    config.limits = limits;

    let worker = zk_election::start_election(config).expect("election started");
    let role_change_rx = worker.role_change_rx();
    let session_lost_rx = worker.session_lost_rx();

    // skip the notification of the initial resolution
    let status = role_change_rx
        .recv_timeout(super::get_notification_timeout())
        .expect("initial role notification");
    info!("--Candidate started: {:?}", status);

    CaseCandidate {
        client,
        worker,
        role_change_rx,
        session_lost_rx,
    }
}

pub fn start_candidates(service: &MemoryCoordinationService, count: usize) -> Vec<CaseCandidate> {
    (0..count).map(|_| start_candidate(service)).collect()
}

pub fn terminate_all(candidates: Vec<CaseCandidate>) {
    for candidate in candidates {
        candidate.terminate();
    }
}
