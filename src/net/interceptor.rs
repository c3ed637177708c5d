//! Request/response wrapper applied to every REST call.
//!
//! ARCHITECTURE
//! ============
//! Request phase: re-read the token from the session at dispatch time, attach
//! `Authorization: Bearer <token>`, signal progress start.
//! Response phase: signal progress done, unwrap the body on success, or
//! classify the failure into an [`ApiError`], apply its side effect once, and
//! return it to the caller.
//!
//! A 401 outside the login route clears the session, notifies, and redirects
//! to login. Only the call that actually removed a token does the notice and
//! the redirect, so a racing 401 on the same token stays quiet even before the
//! router has committed the first redirect.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::rc::Rc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::request::{DispatchedRequest, NoticePolicy, PendingRequest};
use super::transport::{RawResponse, Transport};
use crate::config::ClientConfig;
use crate::router::navigator::Navigator;
use crate::router::routes::LOGIN_PATH;
use crate::state::session::Session;
use crate::util::notify::Notifier;
use crate::util::progress::Progress;

pub struct Interceptor {
    transport: Rc<dyn Transport>,
    session: Rc<Session>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    progress: Rc<dyn Progress>,
    base_url: String,
    timeout: Duration,
}

impl Interceptor {
    pub fn new(
        config: &ClientConfig,
        transport: Rc<dyn Transport>,
        session: Rc<Session>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        progress: Rc<dyn Progress>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
            notifier,
            progress,
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        }
    }

    /// Send `request` and decode the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] after its side effects (session
    /// expiry, notice per the request's [`NoticePolicy`]) have been applied.
    pub async fn send<T: DeserializeOwned>(&self, request: PendingRequest) -> Result<T, ApiError> {
        let notice = request.notice;
        let result = self.execute(request).await.and_then(|body| {
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
        });
        if let Err(err) = &result {
            self.handle_failure(err, notice);
        }
        result
    }

    async fn execute(&self, request: PendingRequest) -> Result<serde_json::Value, ApiError> {
        let dispatched = self.prepare(&request);
        self.progress.start();
        let outcome = self.transport.execute(&dispatched).await;
        self.progress.done();

        match outcome {
            Ok(resp) => classify(&resp),
            Err(e) => {
                log::error!("[Response] {} {} failed: {e}", dispatched.method, dispatched.url);
                Err(ApiError::TransportUnavailable(e.to_string()))
            }
        }
    }

    fn prepare(&self, request: &PendingRequest) -> DispatchedRequest {
        let mut headers = request.headers.clone();
        headers.retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
        match self.session.token() {
            Some(token) => headers.push(("Authorization".to_owned(), format!("Bearer {token}"))),
            None => log::warn!("[Request] no token found"),
        }
        let dispatched = DispatchedRequest {
            method: request.method,
            url: request.url(&self.base_url),
            headers,
            body: request.body.clone(),
            timeout: self.timeout,
        };
        log::debug!("[Request] {} {}", dispatched.method, dispatched.url);
        dispatched
    }

    fn handle_failure(&self, err: &ApiError, notice: NoticePolicy) {
        if let ApiError::AuthorizationExpired = err {
            self.expire(notice);
            return;
        }
        if notice == NoticePolicy::Global {
            self.notifier.show(err.notification());
        }
    }

    fn expire(&self, notice: NoticePolicy) {
        if self.navigator.current_path() == LOGIN_PATH {
            return;
        }
        if !self.session.clear() {
            log::debug!("[Response] 401 after session already cleared");
            return;
        }
        if notice == NoticePolicy::Global {
            self.notifier.show(ApiError::AuthorizationExpired.notification());
        }
        self.navigator.navigate(LOGIN_PATH);
    }
}

fn classify(resp: &RawResponse) -> Result<serde_json::Value, ApiError> {
    if !resp.is_success() {
        return Err(ApiError::from_status(resp.status, &resp.body));
    }
    if resp.body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
}
