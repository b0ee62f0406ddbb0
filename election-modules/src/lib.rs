//! Pluggable implementations for the election core: an in-memory coordination service and
//! the backoff policies.

#[macro_use]
extern crate log;
extern crate crossbeam_channel;
extern crate zk_election;

mod backoff;
mod coordination;

pub use backoff::fixed_backoff::FixedBackoff;
pub use backoff::randomized_backoff::RandomizedBackoff;
pub use coordination::memory_service::{MemoryCoordinationClient, MemoryCoordinationService};
