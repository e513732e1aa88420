//! Command implementations shared by the CLI binaries.
//!
//! Commands never fail: every outcome, including errors, is folded into the
//! envelope the binary prints.

pub mod probe;
pub mod search;
