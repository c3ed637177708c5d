//! Navigation seam: read the current location and redirect.

use std::cell::RefCell;

pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// In-memory navigator for host builds and tests; records every redirect.
#[derive(Debug)]
pub struct MemoryNavigator {
    current: RefCell<String>,
    history: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(start: &str) -> Self {
        Self { current: RefCell::new(start.to_owned()), history: RefCell::new(Vec::new()) }
    }

    /// Redirects issued so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        *self.current.borrow_mut() = path.to_owned();
        self.history.borrow_mut().push(path.to_owned());
    }
}

/// Leptos router navigation, with the current path read from
/// `window.location`.
#[cfg(feature = "hydrate")]
pub struct RouterNavigator<F> {
    navigate: F,
}

#[cfg(feature = "hydrate")]
impl<F> RouterNavigator<F>
where
    F: Fn(&str, leptos_router::NavigateOptions),
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

#[cfg(feature = "hydrate")]
impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, leptos_router::NavigateOptions),
{
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        (self.navigate)(path, leptos_router::NavigateOptions::default());
    }
}
