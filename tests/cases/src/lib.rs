//! # Election test cases
//!
//! This subproject provides end-to-end scenarios for the election protocol running
//! against the in-memory coordination service.

#[macro_use]
extern crate log;
pub mod cases;
mod steps;

pub use self::cases::smoke;
