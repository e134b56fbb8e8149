//! Change event payload.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of mutation a registry performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    Replaced,
    /// In-place update of a stored record.
    Property,
}

impl Display for ChangeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Added => "Added",
            Self::Removed => "Removed",
            Self::Replaced => "Replaced",
            Self::Property => "Property",
        };
        f.write_str(label)
    }
}

/// One successful registry mutation.
///
/// Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    collection_name: String,
    kind: ChangeKind,
    description: String,
    registration_number: i32,
}

impl ChangeEvent {
    pub fn new(
        collection_name: impl Into<String>,
        kind: ChangeKind,
        description: impl Into<String>,
        registration_number: i32,
    ) -> Self {
        Self {
            collection_name: collection_name.into(),
            kind,
            description: description.into(),
            registration_number,
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn registration_number(&self) -> i32 {
        self.registration_number
    }
}

impl Display for ChangeEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}: {} ({})",
            self.collection_name, self.kind, self.description, self.registration_number
        )
    }
}
