//! # Coordination-service leader election
//!
//! Leader election over a ZooKeeper-like store: every process registers an ephemeral
//! sequential candidate entry, the smallest sequence number leads, and each follower watches
//! only its immediate predecessor. The coordination client is a consumed capability
//! (`CoordinationClient` + `CoordinationEventChannel`).

#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use] extern crate log;
#[macro_use] extern crate crossbeam_channel;


mod common;
mod candidate;
mod coordination;
mod leadership;
mod node;
mod errors;


pub use candidate::CandidateId;
pub use coordination::{CoordinationClient, CoordinationEvent, CoordinationEventChannel, SessionState};
pub use coordination::path::{ElectionPath, DEFAULT_CANDIDATE_PREFIX, DEFAULT_ELECTION_ROOT};
pub use errors::{ElectionError, ElectionErrorKind, new_err};
pub use leadership::backoff::Backoff;
pub use leadership::resolver::{decide, Decision};
pub use leadership::status::{CandidateStatus, ElectionStatus, Role};
pub use node::configuration::{ElectionConfiguration, ElectionLimits};
pub use node::ElectionWorker;


/// Blocking start: registration and first resolution run on the calling thread. Wait on
/// `ElectionWorker::session_lost_rx` afterwards for the terminal signal.
pub fn start_election<Cc, Bp>(config : ElectionConfiguration<Cc, Bp>) -> Result<ElectionWorker, ElectionError>
where Cc : CoordinationClient + CoordinationEventChannel,
	  Bp : Backoff {

	node::start(config)
}
