#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Bloom tools front-end logic.
//!
//! Each tool is a feature slice under `features/`: form state kept as strings,
//! pure calculation helpers, user actions, and a sync controller that talks to
//! the remote service through the traits in `bloom-tools-core`. Rendering lives
//! elsewhere; everything here is plain Rust and testable on the host.

pub mod core;
pub mod features;

pub use crate::core::clock::{Clock, fixed_clock, system_clock};
pub use crate::core::mount::MountHandle;
pub use crate::core::sync::SyncOutcome;
