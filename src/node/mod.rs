use crossbeam_channel::Receiver;

use crate::common::{self, Worker};
use crate::coordination::{CoordinationClient, CoordinationEventChannel};
use crate::errors::Result;
use crate::leadership::backoff::Backoff;
use crate::leadership::dispatcher::{run_event_dispatcher, EventDispatcherParams};
use crate::leadership::engine::ElectionEngine;
use crate::leadership::status::observer::{ElectionObserver, ElectionObserverChannelRx};
use crate::leadership::status::{ElectionStatus, Role};

pub mod configuration;

use configuration::ElectionConfiguration;

/// Handle to a running election: status queries, notifications and shutdown.
#[derive(Debug)]
pub struct ElectionWorker {
    worker: Worker,
    observer: ElectionObserver,
}

impl ElectionWorker {
    pub fn status(&self) -> ElectionStatus {
        self.observer.status()
    }

    pub fn role(&self) -> Role {
        self.observer.role()
    }

    pub fn is_leader(&self) -> bool {
        self.role() == Role::Leader
    }

    /// Snapshots sent on every role or leader change.
    pub fn role_change_rx(&self) -> Receiver<ElectionStatus> {
        self.observer.role_change_rx().clone()
    }

    /// Fires once the election session is irrecoverably lost. Carries the reason.
    pub fn session_lost_rx(&self) -> Receiver<String> {
        self.observer.session_lost_rx().clone()
    }

    pub fn terminate(&self) {
        self.worker.terminate();
    }

    pub fn join(self) {
        self.worker.join();
    }
}

/// Registers the candidate, runs the first resolution on the calling thread and hands
/// the engine over to the event dispatcher worker.
pub fn start<Cc, Bp>(config: ElectionConfiguration<Cc, Bp>) -> Result<ElectionWorker>
where
    Cc: CoordinationClient + CoordinationEventChannel,
    Bp: Backoff,
{
    let observer = ElectionObserver::new();
    let coordination_event_rx = config.coordination_client.coordination_event_rx();

    let mut engine = ElectionEngine::new(
        config.coordination_client,
        config.election_path,
        config.backoff,
        config.limits,
        observer.clone(),
    );
    engine.start()?;
    if let Some(candidate_id) = &engine.state().candidate_id {
        info!("Candidate {} joined the election as {}", candidate_id, engine.state().role);
    }

    let worker = common::run_worker(
        run_event_dispatcher,
        EventDispatcherParams {
            engine,
            coordination_event_rx,
        },
    );

    Ok(ElectionWorker { worker, observer })
}
