//! Leptos glue for the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route change runs through the same guard evaluation: set the document
//! title, then redirect when the guard says so.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::router::guard::{GuardDecision, NavigationGuard};

/// Evaluate `guard` on every location change. Must be called inside a
/// component under the `<Router>`.
pub fn install_route_guard<F>(guard: Rc<NavigationGuard>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        let outcome = guard.evaluate(&path);
        set_document_title(&outcome.title);
        if let GuardDecision::Redirect(to) = outcome.decision {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

fn set_document_title(title: &str) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(title);
    }
}
