//! Process-wide authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session writes through to durable storage synchronously on every
//! mutation, and every reader (interceptor, guard, store) goes through the
//! storage-backed accessors below. There is no cached copy to go stale.
//!
//! INVARIANTS
//! ==========
//! - A profile is only ever reported while a non-empty token is stored.
//! - `establish` and `clear` change token and profile as one unit: callers and
//!   observers never see one without the other.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::net::types::UserProfile;
use crate::util::storage::{KeyValueStore, StorageError, load_json, save_json};

pub const TOKEN_KEY: &str = "access_token";
pub const PROFILE_KEY: &str = "user_info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    Authenticated,
}

/// Point-in-time view of the session, handed to observers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
}

impl SessionSnapshot {
    pub fn phase(&self) -> SessionPhase {
        if self.token.is_some() { SessionPhase::Authenticated } else { SessionPhase::Unauthenticated }
    }
}

/// Receives the new snapshot synchronously after each session mutation,
/// before the mutating operation moves on (e.g. navigates).
pub trait SessionObserver {
    fn session_changed(&self, snapshot: &SessionSnapshot);
}

impl SessionObserver for RwSignal<SessionSnapshot> {
    fn session_changed(&self, snapshot: &SessionSnapshot) {
        self.set(snapshot.clone());
    }
}

pub struct Session {
    storage: Rc<dyn KeyValueStore>,
    observers: RefCell<Vec<Rc<dyn SessionObserver>>>,
}

impl Session {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage, observers: RefCell::new(Vec::new()) }
    }

    /// Current bearer token; an empty stored value counts as absent.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Current profile. Missing, `null`, or corrupt stored values read as
    /// absent, as does any profile left behind without a token.
    pub fn profile(&self) -> Option<UserProfile> {
        self.token()?;
        load_json::<Option<UserProfile>>(self.storage.as_ref(), PROFILE_KEY).flatten()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot { token: self.token(), profile: self.profile() }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.token().is_some() { SessionPhase::Authenticated } else { SessionPhase::Unauthenticated }
    }

    pub fn subscribe(&self, observer: Rc<dyn SessionObserver>) {
        self.observers.borrow_mut().push(observer);
    }

    /// Store a fresh token and profile after login.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if either write fails. The previous token is
    /// put back, so an existing session survives a failed login.
    pub fn establish(&self, token: &str, profile: &UserProfile) -> Result<(), StorageError> {
        let previous_token = self.storage.get(TOKEN_KEY);
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = save_json(self.storage.as_ref(), PROFILE_KEY, profile) {
            log::warn!("[Session] establish failed, restoring previous token: {e}");
            self.restore_token(previous_token.as_deref());
            return Err(e);
        }
        self.publish();
        Ok(())
    }

    /// Overwrite the stored profile, keeping the token.
    ///
    /// Returns `Ok(false)` without writing when no token is present, since a
    /// profile may not outlive its session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails; the old profile stays.
    pub fn replace_profile(&self, profile: &UserProfile) -> Result<bool, StorageError> {
        if self.token().is_none() {
            log::warn!("[Session] ignoring profile update without a token");
            return Ok(false);
        }
        save_json(self.storage.as_ref(), PROFILE_KEY, profile)?;
        self.publish();
        Ok(true)
    }

    /// Drop token and profile. Returns whether a token was present.
    pub fn clear(&self) -> bool {
        let had_token = self.token().is_some();
        self.remove_both();
        self.publish();
        had_token
    }

    fn remove_both(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(PROFILE_KEY);
    }

    fn restore_token(&self, previous: Option<&str>) {
        let Some(token) = previous else {
            self.storage.remove(TOKEN_KEY);
            return;
        };
        if let Err(e) = self.storage.set(TOKEN_KEY, token) {
            log::error!("[Session] could not restore token, clearing session: {e}");
            self.remove_both();
            self.publish();
        }
    }

    fn publish(&self) {
        let observers: Vec<Rc<dyn SessionObserver>> = self.observers.borrow().clone();
        if observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in observers {
            observer.session_changed(&snapshot);
        }
    }
}
