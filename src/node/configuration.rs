use crate::coordination::path::ElectionPath;
use crate::coordination::{CoordinationClient, CoordinationEventChannel};
use crate::leadership::backoff::Backoff;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ElectionLimits {
    /// Resolution attempts per round before the round is deferred.
    pub max_resolve_attempts: u32,

    /// Deferred rounds retried after a backoff before the election fails.
    pub max_deferred_resolutions: u32,

    /// Re-register in a fresh session after the previous one was lost.
    pub rejoin_after_session_loss: bool,
}

impl Default for ElectionLimits {
    fn default() -> Self {
        ElectionLimits {
            max_resolve_attempts: 5,
            max_deferred_resolutions: 3,
            rejoin_after_session_loss: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ElectionConfiguration<Cc, Bp>
    where Cc : CoordinationClient + CoordinationEventChannel,
          Bp : Backoff {
    pub election_path: ElectionPath,
    pub coordination_client: Cc,
    pub backoff: Bp,
    pub limits: ElectionLimits,
}

impl<Cc, Bp> ElectionConfiguration<Cc, Bp>
    where Cc : CoordinationClient + CoordinationEventChannel,
          Bp : Backoff {
    /// Configuration with the default `/election` namespace and limits.
    pub fn new(coordination_client: Cc, backoff: Bp) -> ElectionConfiguration<Cc, Bp> {
        ElectionConfiguration {
            election_path: ElectionPath::default(),
            coordination_client,
            backoff,
            limits: ElectionLimits::default(),
        }
    }
}
