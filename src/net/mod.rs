//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` describes outbound calls, `transport` executes them, `interceptor`
//! wraps every call with the bearer token and failure policy, `api` exposes the
//! auth endpoints, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod interceptor;
pub mod request;
pub mod transport;
pub mod types;
