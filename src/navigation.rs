//! Routing seam.
//!
//! Resolving stats while the user is still on the anonymous landing
//! route triggers a redirect to the dashboard. The actual routing
//! machinery belongs to the embedding UI layer; this crate only needs
//! to observe the current route and request the one redirect.

/// The two routes the bootstrap sequence cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Anonymous landing route.
    Landing,
    /// Authenticated dashboard route.
    Dashboard,
}

/// Routing seam implemented by the embedding application.
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> Route;

    fn redirect(&self, to: Route);
}

/// Navigator for headless embeddings: never on the landing route,
/// redirects are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_route(&self) -> Route {
        Route::Dashboard
    }

    fn redirect(&self, _to: Route) {}
}

#[cfg(any(test, feature = "mocks"))]
pub use mock::MockNavigator;

#[cfg(any(test, feature = "mocks"))]
mod mock {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use super::{Navigator, Route};

    /// Records redirects and lets tests position the current route.
    #[derive(Clone)]
    pub struct MockNavigator {
        pub route: Arc<Mutex<Route>>,
        pub redirects: Arc<Mutex<Vec<Route>>>,
    }

    impl MockNavigator {
        /// A navigator positioned on the landing route.
        pub fn new() -> Self {
            Self::at(Route::Landing)
        }

        pub fn at(route: Route) -> Self {
            Self {
                route: Arc::new(Mutex::new(route)),
                redirects: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn redirect_count(&self) -> usize {
            self.redirects.lock().unwrap().len()
        }

        pub fn last_redirect(&self) -> Option<Route> {
            self.redirects.lock().unwrap().last().copied()
        }
    }

    impl Default for MockNavigator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Navigator for MockNavigator {
        fn current_route(&self) -> Route {
            *self.route.lock().unwrap()
        }

        fn redirect(&self, to: Route) {
            self.redirects.lock().unwrap().push(to);
            *self.route.lock().unwrap() = to;
        }
    }
}
