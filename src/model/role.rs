use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];
    pub const MANAGEMENT: [Role; 2] = [Role::Admin, Role::Manager];

    /// Derives a role from free-text job position.
    ///
    /// Case-insensitive substring match with a fixed priority: "admin" wins
    /// over "manager", anything else is an employee. A position such as
    /// "Admin Manager" therefore resolves to admin.
    pub fn from_position(position: &str) -> Self {
        let pos = position.to_lowercase();

        if pos.contains("admin") {
            Role::Admin
        } else if pos.contains("manager") {
            Role::Manager
        } else {
            Role::Employee
        }
    }

    /// Admin or manager.
    pub fn is_management(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    pub fn can_create_tasks(&self) -> bool {
        self.is_management()
    }

    pub fn can_delete_tasks(&self) -> bool {
        *self == Role::Admin
    }

    pub fn can_delete_documents(&self) -> bool {
        *self == Role::Admin
    }

    pub fn sees_all_documents(&self) -> bool {
        *self == Role::Admin
    }

    /// Create and delete entries in the employee directory.
    pub fn can_edit_directory(&self) -> bool {
        *self == Role::Admin
    }

    /// "Assign task" shortcut from the directory.
    pub fn can_assign_from_directory(&self) -> bool {
        *self == Role::Manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn admin_substring_wins_in_any_case() {
        assert_eq!(Role::from_position("Senior Admin Lead"), Role::Admin);
        assert_eq!(Role::from_position("SYSTEM ADMINISTRATOR"), Role::Admin);
        assert_eq!(Role::from_position("sysadmin"), Role::Admin);
    }

    #[test]
    fn admin_beats_manager_when_both_present() {
        assert_eq!(Role::from_position("Admin Manager"), Role::Admin);
        assert_eq!(Role::from_position("Manager of Administration"), Role::Admin);
    }

    #[test]
    fn manager_without_admin() {
        assert_eq!(Role::from_position("Project Manager"), Role::Manager);
        assert_eq!(Role::from_position("general MANAGER"), Role::Manager);
    }

    #[test]
    fn everything_else_is_employee() {
        assert_eq!(Role::from_position("Software Developer"), Role::Employee);
        assert_eq!(Role::from_position(""), Role::Employee);
        assert_eq!(Role::from_position("Managing Director"), Role::Employee);
    }

    #[test]
    fn string_forms_are_lowercase() {
        assert_eq!(Role::Manager.to_string(), "manager");
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");
    }

    #[test]
    fn permissions_follow_role() {
        assert!(Role::Admin.can_delete_tasks());
        assert!(!Role::Manager.can_delete_tasks());
        assert!(Role::Manager.can_create_tasks());
        assert!(!Role::Employee.can_create_tasks());
        assert!(Role::Manager.can_assign_from_directory());
        assert!(!Role::Admin.can_assign_from_directory());
        assert!(Role::Admin.can_edit_directory());
        assert!(!Role::Manager.can_edit_directory());
    }
}
