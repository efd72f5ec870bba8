use std::sync::{Mutex, MutexGuard, PoisonError};

use strum_macros::{AsRefStr, Display};

/// Top-level pages of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Tasks,
    Documents,
    Employees,
    Reminders,
}

/// State carried along with a navigation instead of in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    /// Documents page scoped to one task.
    TaskDocuments { task_id: String, task_title: String },
    /// Tasks page with the create form open for this assignee.
    AssignTask { employee_id: String },
}

impl NavState {
    pub fn target(&self) -> Page {
        match self {
            NavState::TaskDocuments { .. } => Page::Documents,
            NavState::AssignTask { .. } => Page::Tasks,
        }
    }

    /// Whether reading the state clears it.
    fn is_one_shot(&self) -> bool {
        matches!(self, NavState::AssignTask { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    Validation,
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Validation,
            message: message.into(),
        }
    }
}

/// Browser-history stand-in for the single profile this portal serves: one
/// pending navigation state and one pending alert.
#[derive(Default)]
pub struct History {
    state: Mutex<Option<NavState>>,
    alert: Mutex<Option<Alert>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl History {
    pub fn navigate(&self, state: NavState) {
        *lock(&self.state) = Some(state);
    }

    /// Called when `page` renders. Returns the state meant for it; state for
    /// any other page is dropped because the user navigated elsewhere.
    pub fn enter(&self, page: Page) -> Option<NavState> {
        let mut slot = lock(&self.state);
        match slot.as_ref() {
            Some(state) if state.target() == page => {
                if state.is_one_shot() {
                    slot.take()
                } else {
                    slot.clone()
                }
            }
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    pub fn flash(&self, alert: Alert) {
        *lock(&self.alert) = Some(alert);
    }

    pub fn take_alert(&self) -> Option<Alert> {
        lock(&self.alert).take()
    }

    /// Forgets everything, e.g. on logout.
    pub fn clear(&self) {
        *lock(&self.state) = None;
        *lock(&self.alert) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_docs() -> NavState {
        NavState::TaskDocuments {
            task_id: "t1".into(),
            task_title: "Report".into(),
        }
    }

    #[test]
    fn task_scope_survives_documents_reloads() {
        let history = History::default();
        history.navigate(task_docs());
        assert_eq!(history.enter(Page::Documents), Some(task_docs()));
        assert_eq!(history.enter(Page::Documents), Some(task_docs()));
    }

    #[test]
    fn leaving_documents_drops_task_scope() {
        let history = History::default();
        history.navigate(task_docs());
        assert_eq!(history.enter(Page::Tasks), None);
        assert_eq!(history.enter(Page::Documents), None);
    }

    #[test]
    fn assign_state_is_consumed_once() {
        let history = History::default();
        let assign = NavState::AssignTask {
            employee_id: "e7".into(),
        };
        history.navigate(assign.clone());
        assert_eq!(history.enter(Page::Tasks), Some(assign));
        assert_eq!(history.enter(Page::Tasks), None);
    }

    #[test]
    fn alerts_show_once() {
        let history = History::default();
        history.flash(Alert::error("Delete failed"));
        assert_eq!(history.take_alert(), Some(Alert::error("Delete failed")));
        assert_eq!(history.take_alert(), None);
    }
}
