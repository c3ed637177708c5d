//! Browser-facing collaborators shared across the session core.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module isolates one environment concern behind a trait so the
//! interceptor, session store, and guard stay host-testable.

#[cfg(feature = "hydrate")]
pub mod auth;
pub mod notify;
pub mod progress;
pub mod storage;
