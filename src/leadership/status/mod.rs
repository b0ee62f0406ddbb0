use derive_more::Display;

use crate::candidate::CandidateId;

pub mod observer;

/// Election engine state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum CandidateStatus {
	Unregistered,
	Registering,
	Resolving,
	Leader,
	Following,
	SessionLost,
	Fatal,
}

/// Externally visible role of this process.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum Role {
	Leader,
	Follower,
	Unresolved,
}

/// Snapshot of the election state published for the caller.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElectionStatus {
	pub status: CandidateStatus,
	pub role: Role,
	pub candidate_id: Option<CandidateId>,
	pub leader_id: Option<CandidateId>,
	pub watched_predecessor: Option<CandidateId>,
}

impl Default for ElectionStatus {
	fn default() -> Self {
		ElectionStatus {
			status: CandidateStatus::Unregistered,
			role: Role::Unresolved,
			candidate_id: None,
			leader_id: None,
			watched_predecessor: None,
		}
	}
}
