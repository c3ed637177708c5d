//! Route descriptors for the knowledge-base views.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/documents";

/// Paths reachable without a token.
pub const PUBLIC_WHITELIST: &[&str] = &[LOGIN_PATH];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub title: Option<String>,
    pub requires_auth: bool,
}

impl RouteDescriptor {
    pub fn public(path: &str, title: &str) -> Self {
        Self { path: path.to_owned(), title: Some(title.to_owned()), requires_auth: false }
    }

    pub fn protected(path: &str, title: &str) -> Self {
        Self { path: path.to_owned(), title: Some(title.to_owned()), requires_auth: true }
    }

    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    aliases: Vec<(&'static str, &'static str)>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: vec![
                RouteDescriptor::public(LOGIN_PATH, "Login"),
                RouteDescriptor::protected(LANDING_PATH, "Knowledge Base"),
                RouteDescriptor::protected("/search", "Smart Search"),
                RouteDescriptor::protected("/analysis", "Data Analysis"),
            ],
            aliases: vec![("/", LANDING_PATH)],
        }
    }
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes, aliases: Vec::new() }
    }

    /// Descriptor for `path`, ignoring any query string, fragment, or trailing
    /// slash. Unknown paths require authentication and carry no title.
    pub fn resolve(&self, path: &str) -> RouteDescriptor {
        let path = normalize_path(path);
        let path = self
            .aliases
            .iter()
            .find(|(from, _)| *from == path)
            .map_or(path, |(_, to)| *to);
        self.routes
            .iter()
            .find(|r| r.path == path)
            .cloned()
            .unwrap_or_else(|| RouteDescriptor { path: path.to_owned(), title: None, requires_auth: true })
    }
}

fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Compose the document title for a route.
pub fn document_title(route: &RouteDescriptor, app_name: &str) -> String {
    match &route.title {
        Some(title) => format!("{title} - {app_name}"),
        None => app_name.to_owned(),
    }
}
