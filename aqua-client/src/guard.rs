//! Route table and route guard
//!
//! The guard is pure branching over the session state. It blocks protected
//! content until the session has resolved, sends anonymous visitors to
//! sign-in, and sends signed-in users without a matching role to the default
//! authenticated page.

use shared::models::Role;

use crate::session::SessionState;

/// Sign-in page
pub const SIGN_IN: &str = "/signin";
/// Default landing page for authenticated users
pub const DEFAULT_AUTHENTICATED: &str = "/dashboard";

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any authenticated user when the role list is empty
    Protected(&'static [Role]),
}

/// One navigable path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Path pattern; `:name` segments match any single segment
    pub pattern: &'static str,
    pub title: &'static str,
    pub access: Access,
}

const OWNER: &[Role] = &[Role::Owner];
const ADMIN: &[Role] = &[Role::Admin];
const INSPECTION: &[Role] = &[Role::Inspector, Role::Admin];
const ANY: &[Role] = &[];

/// Every path of the application
pub const ROUTES: &[Route] = &[
    Route { pattern: "/", title: "Home", access: Access::Public },
    Route { pattern: "/signin", title: "Sign in", access: Access::Public },
    Route { pattern: "/signup", title: "Sign up", access: Access::Public },
    Route { pattern: "/pricing", title: "Pricing", access: Access::Public },
    Route { pattern: "/complaints/new", title: "Submit a complaint", access: Access::Public },
    Route { pattern: "/complaints/track", title: "Track a complaint", access: Access::Public },
    Route { pattern: "/knowledge", title: "Knowledge hub", access: Access::Public },
    Route { pattern: "/knowledge/:slug", title: "Article", access: Access::Public },
    Route { pattern: "/about", title: "About", access: Access::Public },
    Route { pattern: "/contact", title: "Contact", access: Access::Public },
    Route { pattern: "/privacy", title: "Privacy policy", access: Access::Public },
    Route { pattern: "/terms", title: "Terms of service", access: Access::Public },
    Route { pattern: "/dashboard", title: "Dashboard", access: Access::Protected(ANY) },
    Route { pattern: "/plant-setup", title: "Plant setup", access: Access::Protected(OWNER) },
    Route { pattern: "/lab-booking", title: "Lab booking", access: Access::Protected(OWNER) },
    Route { pattern: "/payment", title: "Payment", access: Access::Protected(OWNER) },
    Route { pattern: "/admin", title: "Admin panel", access: Access::Protected(ADMIN) },
    Route { pattern: "/inspections", title: "Inspections", access: Access::Protected(INSPECTION) },
    Route {
        pattern: "/inspector/complaints",
        title: "Inspector complaints",
        access: Access::Protected(INSPECTION),
    },
];

impl Route {
    fn matches(&self, path: &str) -> bool {
        let mut pattern = self.pattern.split('/').filter(|s| !s.is_empty());
        let mut actual = path.split('/').filter(|s| !s.is_empty());
        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') || p == a => continue,
                _ => return false,
            }
        }
    }
}

/// Find the route serving `path` (query string and trailing slash ignored)
pub fn resolve(path: &str) -> Option<&'static Route> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    ROUTES.iter().find(|route| route.matches(path))
}

/// Guard decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session not resolved yet; render nothing protected
    Loading,
    Render,
    Redirect(&'static str),
}

/// Decide whether protected content may render
///
/// An empty `required` list admits any authenticated user.
pub fn guard(required: &[Role], session: &SessionState) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::Loading;
    }
    let Some(user) = session.user.as_ref().filter(|_| session.is_authenticated) else {
        return GuardOutcome::Redirect(SIGN_IN);
    };
    if required.is_empty() || required.contains(&user.role) {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect(DEFAULT_AUTHENTICATED)
    }
}

/// Result of navigating to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(&'static Route),
    Loading,
    Redirect(&'static str),
    NotFound,
}

/// Resolve `path` and run the guard for it
pub fn navigate(path: &str, session: &SessionState) -> Navigation {
    let Some(route) = resolve(path) else {
        return Navigation::NotFound;
    };
    match route.access {
        Access::Public => Navigation::Render(route),
        Access::Protected(roles) => match guard(roles, session) {
            GuardOutcome::Render => Navigation::Render(route),
            GuardOutcome::Loading => Navigation::Loading,
            GuardOutcome::Redirect(to) => Navigation::Redirect(to),
        },
    }
}
