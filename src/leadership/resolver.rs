use crate::candidate::CandidateId;
use crate::coordination::path::ElectionPath;
use crate::coordination::CoordinationClient;
use crate::errors::{new_err, ElectionErrorKind, Result};

/// Outcome of one resolution round.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Decision {
	/// Own entry has the smallest sequence number. No watch is armed.
	Leader,

	/// Another entry leads. Only the immediate predecessor is watched.
	Follower {
		leader: CandidateId,
		predecessor: CandidateId,
	},
}

/// Decides leadership for a point-in-time candidate snapshot.
pub fn decide(candidates: &[CandidateId], own: &CandidateId) -> Result<Decision> {
	let mut sorted = candidates.to_vec();
	sorted.sort();
	sorted.dedup();

	let position = match sorted.binary_search(own) {
		Ok(position) => position,
		Err(_) => {
			return new_err(ElectionErrorKind::SelfEntryMissing,
						   format!("Candidate {} is absent from the election namespace", own),
						   String::new());
		}
	};

	if position == 0 {
		return Ok(Decision::Leader);
	}

	Ok(Decision::Follower {
		leader: sorted[0].clone(),
		predecessor: sorted[position - 1].clone(),
	})
}

/// Lists the candidates, decides leadership and arms the predecessor watch for followers.
///
/// A predecessor that vanishes between the listing and the watch call restarts the round:
/// sequence numbers only grow, so every restart works on a strictly smaller set of
/// predecessors.
pub fn resolve<Cc: CoordinationClient>(client: &Cc, election_path: &ElectionPath, own: &CandidateId) -> Result<Decision> {
	loop {
		let candidates = list_candidates(client, election_path)?;

		let decision = decide(&candidates, own)?;
		let predecessor = match &decision {
			Decision::Leader => return Ok(decision),
			Decision::Follower { predecessor, .. } => predecessor.clone(),
		};

		let predecessor_path = election_path.full_path(&predecessor);
		let exists = client.exists_with_watch(&predecessor_path).map_err(|err| {
			err.with_kind(ElectionErrorKind::ResolutionTransientFailure,
						  format!("Cannot watch predecessor {}", predecessor_path))
		})?;

		if exists {
			debug!("Candidate {} watches predecessor {}", own, predecessor);
			return Ok(decision);
		}

		debug!("Predecessor {} vanished before the watch was armed. Resolving again", predecessor);
	}
}

fn list_candidates<Cc: CoordinationClient>(client: &Cc, election_path: &ElectionPath) -> Result<Vec<CandidateId>> {
	let children = client.list_children(election_path.root()).map_err(|err| {
		err.with_kind(ElectionErrorKind::ResolutionTransientFailure,
					  format!("Cannot list election namespace {}", election_path.root()))
	})?;

	let mut candidates = Vec::with_capacity(children.len());
	for child in children {
		match election_path.candidate_from_name(&child) {
			Some(candidate) => candidates.push(candidate),
			None => warn!("Ignoring foreign entry {} in election namespace {}", child, election_path.root()),
		}
	}

	Ok(candidates)
}
