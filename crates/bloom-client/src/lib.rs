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
//! HTTP client for the Bloom tools API.
//!
//! Layout: `config.rs` (environment-driven settings), `client.rs` (the
//! `reqwest` implementation of every service trait in `bloom-tools-core`).

pub mod client;
pub mod config;

pub use client::{HEADER_REQUEST_ID, HttpBloomClient};
pub use config::{ClientConfig, ConfigError};
