//! Library surface of the networth HTTP server.
//!
//! Exposed so integration tests (and the utility binaries) can build the
//! application state and router without going through `main`.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod scheduler;

pub use main_lib::{build_state, init_tracing, AppState};
