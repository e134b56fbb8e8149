//! Append-only audit journal fed by registry change events.
//!
//! # Responsibility
//! - Copy every observed `ChangeEvent` into an ordered log.
//! - Stay decoupled from registries: only the `ChangeListener` contract is
//!   shared.
//!
//! # Invariants
//! - Entries are never removed or reordered.
//! - A journal outlives the registries it observes; it only holds copies.

use crate::events::change::{ChangeEvent, ChangeKind};
use crate::events::subscribers::{ChangeListener, SubscriptionId};
use crate::registry::team_registry::TeamRegistry;
use log::trace;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Journal copy of one change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub collection_name: String,
    pub kind: ChangeKind,
    pub description: String,
    pub registration_number: i32,
}

impl From<&ChangeEvent> for JournalEntry {
    fn from(event: &ChangeEvent) -> Self {
        Self {
            collection_name: event.collection_name().to_string(),
            kind: event.kind(),
            description: event.description().to_string(),
            registration_number: event.registration_number(),
        }
    }
}

impl Display for JournalEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}: {} ({})",
            self.collection_name, self.kind, self.description, self.registration_number
        )
    }
}

/// Observer that logs changes from any number of registries.
///
/// Shared as `Rc<TeamsJournal>`; the log sits behind a `RefCell` because
/// listeners are invoked through `&self`.
#[derive(Debug, Default)]
pub struct TeamsJournal {
    entries: RefCell<Vec<JournalEntry>>,
}

impl TeamsJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes this journal to `registry`.
    pub fn subscribe_to(self: &Rc<Self>, registry: &mut TeamRegistry) -> SubscriptionId {
        let listener: Rc<dyn ChangeListener> = self.clone();
        registry.subscribe(listener)
    }

    /// Snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ChangeListener for TeamsJournal {
    fn handle_event(&self, event: &ChangeEvent) {
        let entry = JournalEntry::from(event);
        let mut entries = self.entries.borrow_mut();
        entries.push(entry);
        trace!(
            "event=journal_append module=journal status=ok collection={} kind={} total={}",
            event.collection_name(),
            event.kind(),
            entries.len()
        );
    }
}

impl Display for TeamsJournal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.borrow();
        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TeamsJournal;
    use crate::events::change::{ChangeEvent, ChangeKind};
    use crate::events::subscribers::ChangeListener;

    #[test]
    fn display_lists_one_line_per_entry() {
        let journal = TeamsJournal::new();
        journal.handle_event(&ChangeEvent::new(
            "Collection1",
            ChangeKind::Added,
            "ResearchTeam added",
            1,
        ));
        journal.handle_event(&ChangeEvent::new(
            "Collection2",
            ChangeKind::Removed,
            "ResearchTeam removed",
            2,
        ));

        assert_eq!(
            journal.to_string(),
            "Collection1 - Added: ResearchTeam added (1)\nCollection2 - Removed: ResearchTeam removed (2)"
        );
    }

    #[test]
    fn entries_is_a_snapshot() {
        let journal = TeamsJournal::new();
        let snapshot = journal.entries();
        journal.handle_event(&ChangeEvent::new("c", ChangeKind::Added, "", 1));
        assert!(snapshot.is_empty());
        assert_eq!(journal.len(), 1);
    }
}
