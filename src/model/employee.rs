use serde::{Deserialize, Serialize};

/// A directory entry. Also serves as the signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Free text; the role is derived from it at login.
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
}

impl Employee {
    /// Up to two uppercase initials, e.g. "Jane Smith" -> "JS".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    /// Case-insensitive match on name, position or department.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.position.to_lowercase().contains(&term)
            || self.department.to_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
}

impl NewEmployee {
    /// All four fields are required by the directory.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.position, &self.department]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
