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
#![allow(clippy::module_name_repetitions)]
//! DOM-free desk state and workflows shared by the CLI and the web UI.
//!
//! Layout:
//! - `api.rs`: the ticket client contract and its error type
//! - `config.rs`: backend base URL resolution
//! - `state.rs`: the desk state container
//! - `logic.rs`: pure projections, validation, and display helpers
//! - `store.rs`: the store seam plus an in-memory store
//! - `desk.rs`: user-action workflows

pub mod api;
pub mod config;
pub mod desk;
pub mod logic;
pub mod state;
pub mod store;

pub use api::{ApiError, ApiResult, TicketApi};
pub use desk::Desk;
pub use state::{BusyFlags, DeskState, StatusFilter};
pub use store::{DeskStore, LocalStore};
