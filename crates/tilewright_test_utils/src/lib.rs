//! # Tilewright Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Fixture levels, layers and sprites
//! - Edit scripts that drive an editor through its pointer API
//! - State fingerprints for undo/redo and determinism checks
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fingerprint;
pub mod fixtures;
pub mod script;

/// Re-export proptest for convenience.
pub use proptest;
