//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` holds the storage-backed token and profile; `store` exposes the
//! operations that mutate them.

pub mod session;
pub mod store;
