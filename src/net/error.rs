//! Failure taxonomy for REST calls and session operations.
//!
//! ERROR HANDLING
//! ==============
//! The interceptor classifies every failed round trip into an [`ApiError`],
//! applies the global side effect once, and hands the same value back to the
//! caller so local recovery never has to re-notify.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ErrorBody;
use crate::util::notify::Notification;
use crate::util::storage::StorageError;

pub const UNAUTHORIZED_NOTICE: &str = "Unauthorized, please log in";
pub const FORBIDDEN_NOTICE: &str = "Access denied";
pub const NOT_FOUND_NOTICE: &str = "The requested resource does not exist";
pub const SERVER_ERROR_NOTICE: &str = "Server error";
pub const REQUEST_FAILED_NOTICE: &str = "Request failed";
pub const NETWORK_ERROR_NOTICE: &str = "Network error, please check your connection";
pub const UNEXPECTED_RESPONSE_NOTICE: &str = "Unexpected response from server";

/// Classified outcome of a failed REST call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401: the bearer token is missing, expired, or revoked.
    #[error("authorization expired")]
    AuthorizationExpired,

    /// HTTP 403.
    #[error("access denied")]
    AccessDenied,

    /// HTTP 404.
    #[error("resource not found")]
    NotFound,

    /// HTTP 500.
    #[error("server fault")]
    ServerFault,

    /// Any other non-success status, with the server's message if it sent one.
    #[error("request rejected: status {status}")]
    RequestRejected { status: u16, message: Option<String> },

    /// No HTTP response arrived (network failure, timeout).
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    /// A success response whose body did not match the expected payload.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success HTTP status and its raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::AuthorizationExpired,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            500 => Self::ServerFault,
            _ => Self::RequestRejected { status, message: ErrorBody::message_from(body) },
        }
    }

    /// HTTP status behind this error, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthorizationExpired => Some(401),
            Self::AccessDenied => Some(403),
            Self::NotFound => Some(404),
            Self::ServerFault => Some(500),
            Self::RequestRejected { status, .. } => Some(*status),
            Self::TransportUnavailable(_) | Self::Decode(_) => None,
        }
    }

    /// The user-visible notice for this failure.
    pub fn notification(&self) -> Notification {
        let message = match self {
            Self::AuthorizationExpired => UNAUTHORIZED_NOTICE,
            Self::AccessDenied => FORBIDDEN_NOTICE,
            Self::NotFound => NOT_FOUND_NOTICE,
            Self::ServerFault => SERVER_ERROR_NOTICE,
            Self::RequestRejected { message: Some(message), .. } => return Notification::error(message.clone()),
            Self::RequestRejected { message: None, .. } => REQUEST_FAILED_NOTICE,
            Self::TransportUnavailable(_) => NETWORK_ERROR_NOTICE,
            Self::Decode(_) => UNEXPECTED_RESPONSE_NOTICE,
        };
        Notification::error(message)
    }
}

/// Failure of a session operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            Self::Storage(_) => None,
        }
    }
}
