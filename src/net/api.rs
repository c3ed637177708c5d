//! Auth REST endpoints, all routed through the [`Interceptor`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use super::error::ApiError;
use super::interceptor::Interceptor;
use super::request::{NoticePolicy, PendingRequest};
use super::types::{Credentials, LoginResponse, ProfileResponse, RegisterResponse, Registration};

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_API_PATH: &str = "/auth/login";
pub const ME_PATH: &str = "/auth/me";
pub const LOGOUT_PATH: &str = "/auth/logout";

#[derive(Clone)]
pub struct AuthApi {
    interceptor: Rc<Interceptor>,
}

impl AuthApi {
    pub fn new(interceptor: Rc<Interceptor>) -> Self {
        Self { interceptor }
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns the interceptor's classified [`ApiError`].
    pub async fn register(&self, data: &Registration) -> Result<RegisterResponse, ApiError> {
        let request = PendingRequest::post(REGISTER_PATH).json(data).map_err(encode_error)?;
        self.interceptor.send(request).await
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns the interceptor's classified [`ApiError`].
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = PendingRequest::post(LOGIN_API_PATH).json(credentials).map_err(encode_error)?;
        self.interceptor.send(request).await
    }

    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns the interceptor's classified [`ApiError`].
    pub async fn me(&self) -> Result<ProfileResponse, ApiError> {
        self.interceptor.send(PendingRequest::get(ME_PATH)).await
    }

    /// `POST /auth/logout`. Failures are never surfaced as notices.
    ///
    /// # Errors
    ///
    /// Returns the interceptor's classified [`ApiError`].
    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = PendingRequest::post(LOGOUT_PATH).notice(NoticePolicy::Caller);
        self.interceptor
            .send::<serde_json::Value>(request)
            .await
            .map(|_| ())
    }
}

fn encode_error(e: serde_json::Error) -> ApiError {
    ApiError::Decode(format!("request body encode failed: {e}"))
}
