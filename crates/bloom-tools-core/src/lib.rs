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

//! Service contracts shared by the Bloom tools.
//!
//! Layout: `service.rs` (async traits for the remote collaborators),
//! `error.rs` (transport errors raised when a call never produced an envelope).

pub mod error;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::{DiaperService, DueDateService, JournalService, MetricsService};
