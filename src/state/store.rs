//! Session operations: login, register, logout, profile refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the only writer of [`Session`] state outside forced expiry.
//! Every session mutation completes, observers included, before the store
//! navigates, so the guard always sees the new token.
//!
//! ERROR HANDLING
//! ==============
//! API failures were already notified by the interceptor; operations log them
//! and return them to the caller without a second notice.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::rc::Rc;

use super::session::Session;
use crate::net::api::AuthApi;
use crate::net::error::{ApiError, ClientError};
use crate::net::types::{Credentials, Registration, UserProfile};
use crate::router::navigator::Navigator;
use crate::router::routes::{LANDING_PATH, LOGIN_PATH};
use crate::util::notify::{Notification, Notifier};

pub const LOGIN_SUCCESS_NOTICE: &str = "Login successful";
pub const REGISTER_SUCCESS_NOTICE: &str = "Registration successful, please login";

pub struct SessionStore {
    session: Rc<Session>,
    api: AuthApi,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
}

impl SessionStore {
    pub fn new(session: Rc<Session>, api: AuthApi, navigator: Rc<dyn Navigator>, notifier: Rc<dyn Notifier>) -> Self {
        Self { session, api, navigator, notifier }
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    /// Authenticate and land on the default view.
    ///
    /// # Errors
    ///
    /// Returns the failure with session state unchanged.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ClientError> {
        let resp = self
            .api
            .login(credentials)
            .await
            .inspect_err(|e| log::error!("[Session] login failed: {e}"))?;
        if resp.access_token.is_empty() {
            log::error!("[Session] login response carried an empty token");
            return Err(ApiError::Decode("empty access token".to_owned()).into());
        }
        self.session
            .establish(&resp.access_token, &resp.user)
            .inspect_err(|e| log::error!("[Session] could not persist session: {e}"))?;
        self.notifier.show(Notification::success(LOGIN_SUCCESS_NOTICE));
        self.navigator.navigate(LANDING_PATH);
        Ok(resp.user)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns the interceptor's classified failure.
    pub async fn register(&self, data: &Registration) -> Result<(), ClientError> {
        self.api.register(data).await.inspect_err(|e| log::error!("[Session] register failed: {e}"))?;
        self.notifier.show(Notification::success(REGISTER_SUCCESS_NOTICE));
        Ok(())
    }

    /// End the session. Local state is always cleared, whatever the remote
    /// call does.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            log::error!("[Session] logout request failed: {e}");
        }
        self.session.clear();
        if self.navigator.current_path() != LOGIN_PATH {
            self.navigator.navigate(LOGIN_PATH);
        }
    }

    /// Refresh the stored profile from the server. On failure the previous
    /// profile is kept.
    ///
    /// # Errors
    ///
    /// Returns the interceptor's classified failure or a storage failure.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ClientError> {
        let resp = self.api.me().await.inspect_err(|e| log::error!("[Session] fetch profile failed: {e}"))?;
        self.session.replace_profile(&resp.user)?;
        Ok(resp.user)
    }
}
