pub mod deferred_resolution;
pub mod missing_entry;
pub mod session_loss;
pub mod single_candidate;
pub mod smoke;
