//! Navigation guard evaluated before every route transition.
//!
//! The decision is a pure function of token presence, the target route, and
//! the public whitelist. The token is read through the storage-backed session
//! accessor on every evaluation, the same source the interceptor reads.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use super::routes::{LANDING_PATH, LOGIN_PATH, PUBLIC_WHITELIST, RouteDescriptor, RouteTable, document_title};
use crate::state::session::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardOutcome {
    /// Document title for the target route.
    pub title: String,
    pub decision: GuardDecision,
}

/// Decide a transition to `target`.
pub fn decide(token_present: bool, target: &RouteDescriptor, whitelist: &[&str]) -> GuardDecision {
    if token_present {
        if target.path == LOGIN_PATH {
            return GuardDecision::Redirect(LANDING_PATH);
        }
        return GuardDecision::Allow;
    }
    if whitelist.contains(&target.path.as_str()) || !target.requires_auth {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(LOGIN_PATH)
    }
}

pub struct NavigationGuard {
    session: Rc<Session>,
    routes: RouteTable,
    app_name: String,
}

impl NavigationGuard {
    pub fn new(session: Rc<Session>, routes: RouteTable, app_name: impl Into<String>) -> Self {
        Self { session, routes, app_name: app_name.into() }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Evaluate a transition to `path`.
    pub fn evaluate(&self, path: &str) -> GuardOutcome {
        let target = self.routes.resolve(path);
        let title = document_title(&target, &self.app_name);
        let token_present = self.session.token().is_some();
        let decision = decide(token_present, &target, PUBLIC_WHITELIST);
        if let GuardDecision::Redirect(to) = decision {
            log::debug!("[Guard] {} -> {to}", target.path);
        }
        GuardOutcome { title, decision }
    }
}
