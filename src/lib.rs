/// All logic related to single account management.
/// Balance, the freeze flag and the append-only audit trail live behind
/// a per-account lock, so every operation commits atomically.
pub mod account;

/// Movement of funds between two accounts as a single critical section,
/// with a fixed lock acquisition order to stay deadlock free.
mod transfer;

/// Ideally, this module should exist as its own crate, as a way to
/// bootstrap core logic. However, I want to use it for integration tests
/// so I put it here.
pub mod bin_utils;
