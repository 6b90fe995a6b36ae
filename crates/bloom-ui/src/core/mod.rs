//! Shared controller plumbing.
//!
//! # Design
//! - Keep cross-feature primitives (mount tracking, clocks, sync outcomes) in one place.
//! - Nothing here knows about a specific tool.

pub mod clock;
pub mod mount;
pub mod sync;
