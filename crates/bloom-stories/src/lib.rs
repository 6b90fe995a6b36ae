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
#![allow(clippy::redundant_pub_crate)]

//! Runner for the Bloom tool stories.
//!
//! Layout:
//! - `cli.rs`: argument parsing and story dispatch
//! - `scenarios.rs`: the named stories and the services they run against
//! - `output.rs`: report model and renderers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod output;
pub(crate) mod scenarios;

pub use cli::run;
