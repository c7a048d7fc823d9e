use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Simple theme model, extensible if needed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// The four top-level views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Dashboard,
    Stocks,
    Portfolio,
    Screener,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Dashboard,
        Page::Stocks,
        Page::Portfolio,
        Page::Screener,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Stocks => "Stocks",
            Page::Portfolio => "Portfolio Management",
            Page::Screener => "Stock Screener",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Stocks => "stocks",
            Page::Portfolio => "portfolio",
            Page::Screener => "screener",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Page::ALL.into_iter().find(|p| p.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn tone_class(&self) -> &'static str {
        match self {
            Severity::Success => "notice-good",
            Severity::Error => "notice-error",
        }
    }
}

/// Transient user-facing notification (the snackbar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Request-generation guard for overlapping fetches of the same view.
///
/// Each fetch takes a ticket from `issue()`; before writing its response
/// into state it checks `is_current(ticket)`. Issuing a newer ticket
/// invalidates every older one, so a slow earlier response can no longer
/// overwrite a newer one. There is no cancellation of the stale request
/// itself, only of its state write.
#[derive(Debug, Clone, Default)]
pub struct FetchGuard {
    latest: Rc<Cell<u64>>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_slug_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("settings"), None);
        assert_eq!(Page::default(), Page::Dashboard);
    }

    #[test]
    fn newer_ticket_invalidates_older() {
        let guard = FetchGuard::new();
        let first = guard.issue();
        assert!(guard.is_current(first));

        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));

        // Clones observe the same sequence.
        let alias = guard.clone();
        let third = alias.issue();
        assert!(!guard.is_current(second));
        assert!(guard.is_current(third));
    }

    #[test]
    fn notice_constructors_set_severity() {
        assert_eq!(Notice::success("saved").severity, Severity::Success);
        assert_eq!(Notice::error("failed").severity, Severity::Error);
    }

    #[test]
    fn theme_round_trip() {
        let json = serde_json::to_string(&Theme::Dark).unwrap();
        let decoded: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
