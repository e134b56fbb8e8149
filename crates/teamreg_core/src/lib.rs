//! Research team registry with change notification and an audit journal.
//! This crate owns the registry invariants; callers only see its API.

pub mod events;
pub mod journal;
pub mod logging;
pub mod model;
pub mod registry;

pub use events::change::{ChangeEvent, ChangeKind};
pub use events::subscribers::{ChangeListener, SubscriptionId, Subscribers};
pub use journal::{JournalEntry, TeamsJournal};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::paper::Paper;
pub use model::person::Person;
pub use model::research_team::{ResearchTeam, TimeFrame};
pub use model::team::{Team, TeamValidationError};
pub use registry::key::{KeyParseError, TeamKey};
pub use registry::team_registry::{RegistryError, RegistryResult, TeamRegistry, TimeFrameGroup};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
