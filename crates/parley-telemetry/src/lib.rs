#![forbid(unsafe_code)]
#![warn(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Logging primitives shared by the native Parley binaries.

pub mod init;

pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging, invocation_span,
};
