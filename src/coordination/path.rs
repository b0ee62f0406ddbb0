use crate::candidate::CandidateId;

pub const DEFAULT_ELECTION_ROOT: &str = "/election";
pub const DEFAULT_CANDIDATE_PREFIX: &str = "candidate_";

/// Election namespace layout: the root node and the name prefix of candidate entries.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElectionPath {
    root: String,
    candidate_prefix: String,
}

impl Default for ElectionPath {
    fn default() -> Self {
        ElectionPath::new(DEFAULT_ELECTION_ROOT, DEFAULT_CANDIDATE_PREFIX)
    }
}

impl ElectionPath {
    pub fn new(root: &str, candidate_prefix: &str) -> ElectionPath {
        ElectionPath {
            root: root.trim_end_matches('/').to_string(),
            candidate_prefix: candidate_prefix.to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn candidate_prefix(&self) -> &str {
        &self.candidate_prefix
    }

    /// Prefix passed to the sequential create call, e.g. `/election/candidate_`.
    pub fn creation_prefix(&self) -> String {
        format!("{}/{}", self.root, self.candidate_prefix)
    }

    pub fn full_path(&self, candidate: &CandidateId) -> String {
        format!("{}/{}", self.root, candidate)
    }

    /// Extracts the root-relative candidate name from a full path returned by the service.
    /// Paths outside the election root are rejected.
    pub fn candidate_from_path(&self, full_path: &str) -> Option<CandidateId> {
        let name = full_path
            .strip_prefix(self.root.as_str())?
            .strip_prefix('/')?;

        self.candidate_from_name(name)
    }

    /// Accepts a child name only if it is a candidate entry with a numeric sequence suffix.
    pub fn candidate_from_name(&self, name: &str) -> Option<CandidateId> {
        if !name.starts_with(&self.candidate_prefix) {
            return None;
        }

        let suffix = &name[self.candidate_prefix.len()..];
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let sequence = suffix.parse::<u64>().ok()?;

        Some(CandidateId::new(name, sequence))
    }
}
