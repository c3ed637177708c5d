//! Scripted collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::client::{Collaborators, KbClient};
use crate::config::ClientConfig;
use crate::net::request::DispatchedRequest;
use crate::net::transport::{RawResponse, Transport, TransportError};
use crate::net::types::UserProfile;
use crate::router::navigator::{MemoryNavigator, Navigator};
use crate::state::session::{Session, SessionObserver, SessionSnapshot};
use crate::util::notify::{Notification, Notifier};
use crate::util::progress::Progress;
use crate::util::storage::{KeyValueStore, MemoryStorage, StorageError};

pub const BASE_URL: &str = "http://kb.test/api";

pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: 1,
        username: "alice".to_owned(),
        email: Some("alice@example.com".to_owned()),
        created_at: Some("2025-10-01T08:00:00".to_owned()),
        updated_at: Some("2025-10-01T08:00:00".to_owned()),
    }
}

pub fn profile_json(username: &str) -> String {
    format!(r#"{{"id":2,"username":"{username}","email":"{username}@example.com"}}"#)
}

pub fn memory_session() -> (Rc<MemoryStorage>, Rc<Session>) {
    let storage = Rc::new(MemoryStorage::new());
    let session = Rc::new(Session::new(storage.clone()));
    (storage, session)
}

pub fn test_config() -> ClientConfig {
    ClientConfig { api_base_url: BASE_URL.to_owned(), ..ClientConfig::default() }
}

/// Transport that replays queued outcomes in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<RawResponse, TransportError>>>,
    requests: RefCell<Vec<DispatchedRequest>>,
    yielding: Cell<bool>,
}

impl ScriptedTransport {
    /// Suspend once between dispatch and response, so joined requests are
    /// all in flight before any of them settles.
    pub fn yield_before_responding(&self) {
        self.yielding.set(true);
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.outcomes.borrow_mut().push_back(Ok(RawResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Err(TransportError::Network(message.to_owned())));
    }

    pub fn requests(&self) -> Vec<DispatchedRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &DispatchedRequest) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if self.yielding.get() {
            tokio::task::yield_now().await;
        }
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_owned())))
    }
}

/// Navigator whose location never commits: `current_path` keeps reporting the
/// starting route while redirects pile up in `history`.
pub struct StalledNavigator {
    current: String,
    history: RefCell<Vec<String>>,
}

impl StalledNavigator {
    pub fn new(current: &str) -> Self {
        Self { current: current.to_owned(), history: RefCell::new(Vec::new()) }
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for StalledNavigator {
    fn current_path(&self) -> String {
        self.current.clone()
    }

    fn navigate(&self, path: &str) {
        self.history.borrow_mut().push(path.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notification> {
        self.notices.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notice: Notification) {
        self.notices.borrow_mut().push(notice);
    }
}

#[derive(Default)]
pub struct CountingProgress {
    pub started: Cell<usize>,
    pub done: Cell<usize>,
}

impl Progress for CountingProgress {
    fn start(&self) {
        self.started.set(self.started.get() + 1);
    }

    fn done(&self) {
        self.done.set(self.done.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub snapshots: RefCell<Vec<SessionSnapshot>>,
}

impl SessionObserver for RecordingObserver {
    fn session_changed(&self, snapshot: &SessionSnapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}

/// Memory storage that refuses writes to one key once told to.
#[derive(Default)]
pub struct RefusingStorage {
    inner: MemoryStorage,
    refused_key: Cell<Option<&'static str>>,
}

impl RefusingStorage {
    pub fn new(refused_key: &'static str) -> Self {
        let storage = Self::default();
        storage.refuse(refused_key);
        storage
    }

    pub fn refuse(&self, key: &'static str) {
        self.refused_key.set(Some(key));
    }
}

impl KeyValueStore for RefusingStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.refused_key.get() == Some(key) {
            return Err(StorageError::Write { key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

/// A fully wired client over scripted collaborators.
pub struct Harness {
    pub storage: Rc<MemoryStorage>,
    pub transport: Rc<ScriptedTransport>,
    pub navigator: Rc<MemoryNavigator>,
    pub notifier: Rc<RecordingNotifier>,
    pub progress: Rc<CountingProgress>,
    pub client: KbClient,
}

impl Harness {
    /// Client whose navigator starts at `path`.
    pub fn at(path: &str) -> Self {
        let storage = Rc::new(MemoryStorage::new());
        let transport = Rc::new(ScriptedTransport::default());
        let navigator = Rc::new(MemoryNavigator::new(path));
        let notifier = Rc::new(RecordingNotifier::default());
        let progress = Rc::new(CountingProgress::default());
        let client = KbClient::new(
            &test_config(),
            Collaborators {
                transport: transport.clone(),
                storage: storage.clone(),
                navigator: navigator.clone(),
                notifier: notifier.clone(),
                progress: progress.clone(),
            },
        );
        Self { storage, transport, navigator, notifier, progress, client }
    }

    /// Client signed in as [`sample_profile`] with `token`, sitting at `path`.
    pub fn signed_in(path: &str, token: &str) -> Self {
        let harness = Self::at(path);
        harness
            .client
            .session()
            .establish(token, &sample_profile())
            .expect("memory storage never refuses writes");
        harness
    }
}
