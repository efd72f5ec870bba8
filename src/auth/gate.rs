use crate::auth::session::Session;
use crate::model::Role;

/// Result of checking a navigation attempt against a route's allowed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Allowed,
    /// Nobody is signed in: send them to the login page.
    NoSession,
    /// Signed in with a role the route does not admit.
    Denied(Role),
}

pub fn is_allowed(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

pub fn check(session: Option<&Session>, allowed: &[Role]) -> GateOutcome {
    match session {
        None => GateOutcome::NoSession,
        Some(s) if is_allowed(s.role, allowed) => GateOutcome::Allowed,
        Some(s) => GateOutcome::Denied(s.role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Employee;

    fn session(position: &str) -> Session {
        Session::start(Employee {
            id: "e1".into(),
            position: position.into(),
            ..Employee::default()
        })
    }

    #[test]
    fn missing_session_is_not_a_denial() {
        assert_eq!(check(None, &Role::ALL), GateOutcome::NoSession);
    }

    #[test]
    fn management_routes() {
        assert_eq!(
            check(Some(&session("Project Manager")), &Role::MANAGEMENT),
            GateOutcome::Allowed
        );
        assert_eq!(
            check(Some(&session("Software Developer")), &Role::MANAGEMENT),
            GateOutcome::Denied(Role::Employee)
        );
    }

    #[test]
    fn everyone_passes_common_routes() {
        for position in ["Admin", "Manager", "Developer"] {
            assert_eq!(check(Some(&session(position)), &Role::ALL), GateOutcome::Allowed);
        }
        assert!(!is_allowed(Role::Employee, &[]));
    }
}
