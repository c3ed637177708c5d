//! Route table, navigation seam, and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard is consulted before every route transition; the interceptor may
//! also redirect on forced expiry, independently of the guard.

pub mod guard;
pub mod navigator;
pub mod routes;
