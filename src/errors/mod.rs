use std::error::Error;
use core::fmt;
use derive_more::Display;

/// Classifies election failures. The election engine picks its recovery path by kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum ElectionErrorKind {
	/// Own candidate entry cannot be created.
	RegistrationFailed,

	/// Listing or watch call failed while the session is presumed alive.
	ResolutionTransientFailure,

	/// Own candidate entry is absent from a fresh listing.
	SelfEntryMissing,

	/// Coordination session disconnected or expired.
	SessionLost,

	/// Raw failure reported by the coordination client.
	Coordination,
}

#[derive (Clone, Debug)]
pub struct ElectionError {
	kind: ElectionErrorKind,
	text : String,
	cause: String
}

pub type Result<T> = std::result::Result<T, ElectionError>;

pub fn new_err<T>(kind : ElectionErrorKind, text : String, cause : String) -> Result<T>{
	Err(ElectionError::new(kind, text, cause))
}

impl ElectionError {
	pub fn new(kind : ElectionErrorKind, text : String, cause : String) -> ElectionError {
		ElectionError {kind, text, cause}
	}

	pub fn kind(&self) -> ElectionErrorKind {
		self.kind
	}

	/// Re-labels an error keeping the original message as the cause.
	pub(crate) fn with_kind(self, kind : ElectionErrorKind, text : String) -> ElectionError {
		ElectionError {kind, text, cause: self.to_string()}
	}
}

impl fmt::Display for ElectionError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let cause_word = {
			if !self.cause.is_empty() {
				" Cause: ".to_string()
			} else {
				String::new()
			}
		};
		write!(f, "{}.{}{}", self.text, cause_word, self.cause)
	}
}

impl Error for ElectionError {}
