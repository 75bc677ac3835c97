//! Case report web server
//!
//! Serves the unassigned-case report over HTTP. The router is built here so
//! tests can drive it in-process; `main.rs` only wires configuration,
//! logging and the listener.

pub mod error;
pub mod logging;
pub mod router;
pub mod routes;
pub mod state;

pub use router::build_router;
pub use state::AppState;
