//! Team member model.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// One research team member or paper author.
///
/// Identity is the first `name` only: two people with the same name and
/// different last names are treated as the same author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
        }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Person: {} {}", self.name, self.last_name)
    }
}
