//! Test helpers shared across crates in the dryspec workspace.
//!
//! The crate provides [`Suite`], an in-memory host implementing the
//! `dryspec` capability traits, together with small utilities for figment
//! jails and behavioural step text.

pub mod figment;
mod suite;
pub mod text;

pub use suite::{Instance, Outcome, Report, Status, Suite};
