use derive_more::Display;

/// Root-relative name of a candidate entry, e.g. `candidate_0000000003`.
///
/// Ordering compares the names. With the fixed-width zero-padded suffix assigned by the
/// coordination service this is the same as ordering by sequence number.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "{}", name)]
pub struct CandidateId {
    name: String,
    sequence: u64,
}

impl CandidateId {
    pub fn new(name: &str, sequence: u64) -> CandidateId {
        CandidateId {
            name: name.to_string(),
            sequence,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Service-assigned sequence number.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}
