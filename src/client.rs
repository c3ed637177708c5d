//! Composition root for the session core.
//!
//! DESIGN
//! ======
//! One [`KbClient`] is built at process start and shared by the view layer
//! (e.g. via Leptos context). It owns the single [`Session`]; the session is
//! rehydrated synchronously from durable storage, never from a network call.

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::net::api::AuthApi;
use crate::net::interceptor::Interceptor;
use crate::net::transport::Transport;
use crate::router::guard::NavigationGuard;
use crate::router::navigator::Navigator;
use crate::router::routes::RouteTable;
use crate::state::session::Session;
use crate::state::store::SessionStore;
use crate::util::notify::Notifier;
use crate::util::progress::Progress;
use crate::util::storage::KeyValueStore;

/// External collaborators the core consumes.
pub struct Collaborators {
    pub transport: Rc<dyn Transport>,
    pub storage: Rc<dyn KeyValueStore>,
    pub navigator: Rc<dyn Navigator>,
    pub notifier: Rc<dyn Notifier>,
    pub progress: Rc<dyn Progress>,
}

#[derive(Clone)]
pub struct KbClient {
    session: Rc<Session>,
    interceptor: Rc<Interceptor>,
    store: Rc<SessionStore>,
    guard: Rc<NavigationGuard>,
}

impl KbClient {
    pub fn new(config: &ClientConfig, parts: Collaborators) -> Self {
        let session = Rc::new(Session::new(parts.storage));
        let interceptor = Rc::new(Interceptor::new(
            config,
            parts.transport,
            Rc::clone(&session),
            Rc::clone(&parts.navigator),
            Rc::clone(&parts.notifier),
            parts.progress,
        ));
        let store = Rc::new(SessionStore::new(
            Rc::clone(&session),
            AuthApi::new(Rc::clone(&interceptor)),
            parts.navigator,
            parts.notifier,
        ));
        let guard = Rc::new(NavigationGuard::new(Rc::clone(&session), RouteTable::default(), config.app_name.clone()));
        log::info!("[Session] starting {:?}", session.phase());
        Self { session, interceptor, store, guard }
    }

    /// Browser client over `localStorage`, `fetch`, and the Leptos router.
    ///
    /// `navigate` is the function returned by `leptos_router::hooks::use_navigate`.
    /// Toasts and the in-flight counter are written to the given signals.
    #[cfg(feature = "hydrate")]
    pub fn browser<F>(
        config: &ClientConfig,
        navigate: F,
        toasts: leptos::prelude::RwSignal<Vec<crate::util::notify::Notification>>,
        in_flight: leptos::prelude::RwSignal<usize>,
    ) -> Self
    where
        F: Fn(&str, leptos_router::NavigateOptions) + 'static,
    {
        use crate::net::transport::GlooTransport;
        use crate::router::navigator::RouterNavigator;
        use crate::util::storage::LocalStorage;

        Self::new(
            config,
            Collaborators {
                transport: Rc::new(GlooTransport),
                storage: Rc::new(LocalStorage),
                navigator: Rc::new(RouterNavigator::new(navigate)),
                notifier: Rc::new(toasts),
                progress: Rc::new(in_flight),
            },
        )
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    /// Interceptor for view-level REST calls outside the auth endpoints.
    pub fn interceptor(&self) -> &Rc<Interceptor> {
        &self.interceptor
    }

    pub fn store(&self) -> &Rc<SessionStore> {
        &self.store
    }

    pub fn guard(&self) -> &Rc<NavigationGuard> {
        &self.guard
    }
}
