use crate::candidate::CandidateId;
use crate::coordination::path::ElectionPath;
use crate::coordination::CoordinationClient;
use crate::errors::{new_err, ElectionErrorKind, Result};

/// Creates the ephemeral sequential candidate entry of this process.
/// Must be invoked at most once per session.
pub fn register<Cc: CoordinationClient>(client: &Cc, election_path: &ElectionPath) -> Result<CandidateId> {
	let creation_prefix = election_path.creation_prefix();

	let full_path = client.create_ephemeral_sequential(&creation_prefix).map_err(|err| {
		error!("Cannot create candidate entry with prefix {}: {}", creation_prefix, err);
		err.with_kind(ElectionErrorKind::RegistrationFailed, format!("Cannot create candidate entry with prefix {}", creation_prefix))
	})?;

	match election_path.candidate_from_path(&full_path) {
		Some(candidate) => {
			info!("Registered as candidate {}", candidate);
			Ok(candidate)
		}
		None => new_err(ElectionErrorKind::RegistrationFailed,
						format!("Unexpected candidate entry path {}", full_path),
						String::new()),
	}
}
