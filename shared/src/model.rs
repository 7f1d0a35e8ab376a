use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{config::AppConfig, routes::Route, screens::Screen};

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(EventId);
typed_id!(AddressId);
typed_id!(CategoryId);
typed_id!(ExampleId);

/// Explicit timestamp unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnixTimeMs(pub u64);

/// One mounted lifetime of a screen. Store responses carry the visit they
/// were issued for and are dropped once that visit is over.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitId(pub u64);

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

static ROOT: Route = Route::Home;

/// Route stack. The bottom entry is never popped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    stack: Vec<Route>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }
}

impl Navigation {
    pub fn current(&self) -> &Route {
        self.stack.last().unwrap_or(&ROOT)
    }

    pub fn previous(&self) -> Option<&Route> {
        self.stack.len().checked_sub(2).and_then(|i| self.stack.get(i))
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    pub fn replace(&mut self, route: Route) {
        match self.stack.last_mut() {
            Some(top) => *top = route,
            None => self.stack.push(route),
        }
    }

    /// Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Leaves the current route for `listing`: pops when the listing is
    /// directly underneath, otherwise swaps the current route for it.
    pub fn go_to_listing(&mut self, listing: Route) {
        if self.previous() == Some(&listing) {
            self.stack.pop();
        } else {
            self.replace(listing);
        }
    }

    pub fn reset(&mut self) {
        self.stack = vec![Route::Home];
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: AppConfig,
    pub started: bool,
    pub navigation: Navigation,
    pub screen: Screen,
    pub visit: VisitId,
    pub alert: Option<Alert>,
    last_visit: u64,
}

impl Model {
    /// Ends the current visit and opens a new one.
    pub fn begin_visit(&mut self) -> VisitId {
        self.last_visit = self.last_visit.wrapping_add(1);
        self.visit = VisitId(self.last_visit);
        self.visit
    }

    /// Ends the current visit without opening another, so every in-flight
    /// response becomes stale.
    pub fn end_visit(&mut self) {
        self.last_visit = self.last_visit.wrapping_add(1);
        self.visit = VisitId(self.last_visit);
    }

    #[must_use]
    pub fn is_current(&self, visit: VisitId) -> bool {
        self.started && self.visit == visit
    }

    pub fn show_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
