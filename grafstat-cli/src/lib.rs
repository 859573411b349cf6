//! Support library for the grafstat CLI binary.
//!
//! Exposes the command pipeline and logging setup so tests can drive commands
//! in-process.

pub mod cli;
pub mod logging;
