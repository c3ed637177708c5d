//! # kb-client
//!
//! Browser-side session and request-authorization core for the knowledge-base
//! frontend. Owns the bearer token lifecycle, mediates every REST call through
//! that token, and gates navigation between the login view and authenticated
//! views.
//!
//! The core is host-testable: every browser concern (HTTP, `localStorage`,
//! router, toasts, progress bar) sits behind a trait, and the `hydrate`
//! feature supplies the WASM implementations.

pub mod client;
pub mod config;
pub mod net;
pub mod router;
pub mod state;
pub mod util;

#[cfg(test)]
mod testkit;

pub use client::{Collaborators, KbClient};
pub use config::ClientConfig;
pub use net::error::{ApiError, ClientError};

/// Install browser logging and the panic hook.
///
/// Call once from the WASM entry point before building a [`KbClient`].
#[cfg(feature = "hydrate")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
