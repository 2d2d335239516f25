//! Common types shared across the simulator.

/// Fatal error definitions.
pub mod error;
