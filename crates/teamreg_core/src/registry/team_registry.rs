//! In-memory research team registry.
//!
//! # Responsibility
//! - Map `TeamKey -> ResearchTeam` with unique keys and insertion order.
//! - Emit `ChangeEvent`s to subscribers after each successful mutation.
//!
//! # Invariants
//! - `order` and `teams` always hold the same key set.
//! - Events fire after the map change is visible, before the call returns.
//! - `remove`/`replace` locate targets by value equality, not by key.
//! - `replace`/`update` keep the slot's original key even when the stored
//!   record's derived key changes.

use crate::events::change::{ChangeEvent, ChangeKind};
use crate::events::subscribers::{ChangeListener, SubscriptionId, Subscribers};
use crate::model::research_team::{ResearchTeam, TimeFrame};
use crate::model::team::TeamValidationError;
use crate::registry::key::TeamKey;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const ADDED_DESCRIPTION: &str = "ResearchTeam added";
const REMOVED_DESCRIPTION: &str = "ResearchTeam removed";
const REPLACED_DESCRIPTION: &str = "ResearchTeam replaced";
const UPDATED_DESCRIPTION: &str = "ResearchTeam updated";

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A team with the same derived key is already stored.
    KeyConflict(TeamKey),
    /// Team could not be built before insertion.
    Validation(TeamValidationError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyConflict(key) => write!(f, "team with key `{key}` already exists"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::KeyConflict(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<TeamValidationError> for RegistryError {
    fn from(value: TeamValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One time-frame partition, entries in registry order.
pub type TimeFrameGroup<'a> = (TimeFrame, Vec<(&'a TeamKey, &'a ResearchTeam)>);

/// Named keyed collection of research teams.
pub struct TeamRegistry {
    collection_name: String,
    teams: BTreeMap<TeamKey, ResearchTeam>,
    order: Vec<TeamKey>,
    subscribers: Subscribers,
}

impl TeamRegistry {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            teams: BTreeMap::new(),
            order: Vec::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Identity stamped on every emitted event.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Returns keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &TeamKey> + '_ {
        self.order.iter()
    }

    /// Returns `(key, team)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TeamKey, &ResearchTeam)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.teams.get_key_value(key))
    }

    /// Registers a listener that receives every later event.
    pub fn subscribe(&mut self, listener: Rc<dyn ChangeListener>) -> SubscriptionId {
        let id = self.subscribers.subscribe(listener);
        debug!(
            "event=registry_subscribe module=registry status=ok collection={} subscription={}",
            self.collection_name, id
        );
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.unsubscribe(id);
        debug!(
            "event=registry_unsubscribe module=registry status={} collection={} subscription={}",
            if removed { "ok" } else { "not_found" },
            self.collection_name,
            id
        );
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Inserts a team under its derived key.
    ///
    /// # Errors
    /// - `RegistryError::KeyConflict` when the key is already stored. The
    ///   registry is unchanged and no event is emitted.
    pub fn add(&mut self, team: ResearchTeam) -> RegistryResult<TeamKey> {
        let key = TeamKey::derive(&team);
        if self.teams.contains_key(&key) {
            warn!(
                "event=registry_add module=registry status=conflict collection={} key={}",
                self.collection_name, key
            );
            return Err(RegistryError::KeyConflict(key));
        }

        let registration_number = team.registration_number();
        self.teams.insert(key.clone(), team);
        self.order.push(key.clone());
        debug!(
            "event=registry_add module=registry status=ok collection={} key={}",
            self.collection_name, key
        );

        self.emit(ChangeKind::Added, ADDED_DESCRIPTION, registration_number);
        Ok(key)
    }

    /// Adds every team in order; conflicts do not stop the batch.
    pub fn add_all(
        &mut self,
        teams: impl IntoIterator<Item = ResearchTeam>,
    ) -> Vec<RegistryResult<TeamKey>> {
        teams.into_iter().map(|team| self.add(team)).collect()
    }

    /// Adds the three canonical sample teams, one per time frame.
    pub fn add_defaults(&mut self) -> Vec<RegistryResult<TeamKey>> {
        [
            ("ResearchTopic1", "Org1", 1, TimeFrame::Year),
            ("ResearchTopic2", "Org2", 2, TimeFrame::TwoYears),
            ("ResearchTopic3", "Org3", 3, TimeFrame::Long),
        ]
        .into_iter()
        .map(
            |(topic, organization, registration_number, time_frame)| -> RegistryResult<TeamKey> {
                let team = ResearchTeam::new(topic, organization, registration_number, time_frame)?;
                self.add(team)
            },
        )
        .collect()
    }

    /// Removes the first stored team equal to `team`.
    ///
    /// Returns `false` without emitting when nothing matches.
    pub fn remove(&mut self, team: &ResearchTeam) -> bool {
        let Some(key) = self.find_key_by_value(team) else {
            debug!(
                "event=registry_remove module=registry status=not_found collection={}",
                self.collection_name
            );
            return false;
        };

        self.teams.remove(&key);
        self.order.retain(|stored| stored != &key);
        debug!(
            "event=registry_remove module=registry status=ok collection={} key={}",
            self.collection_name, key
        );

        self.emit(
            ChangeKind::Removed,
            REMOVED_DESCRIPTION,
            team.registration_number(),
        );
        true
    }

    /// Overwrites the slot holding a team equal to `old` with `new`.
    ///
    /// The slot keeps its key; it is not recomputed from `new`.
    pub fn replace(&mut self, old: &ResearchTeam, new: ResearchTeam) -> bool {
        let Some(key) = self.find_key_by_value(old) else {
            debug!(
                "event=registry_replace module=registry status=not_found collection={}",
                self.collection_name
            );
            return false;
        };

        let derived = TeamKey::derive(&new);
        if derived != key {
            debug!(
                "event=registry_replace module=registry status=key_kept collection={} key={} derived_key={}",
                self.collection_name, key, derived
            );
        }
        self.teams.insert(key.clone(), new);
        debug!(
            "event=registry_replace module=registry status=ok collection={} key={}",
            self.collection_name, key
        );

        self.emit(
            ChangeKind::Replaced,
            REPLACED_DESCRIPTION,
            old.registration_number(),
        );
        true
    }

    /// Mutates the team stored at `key` in place and emits one `Property` event.
    ///
    /// The description names the changed observable properties
    /// (`research_topic`, `time_frame`). Returns `false` for unknown keys.
    pub fn update<F>(&mut self, key: &TeamKey, mutate: F) -> bool
    where
        F: FnOnce(&mut ResearchTeam),
    {
        let Some(team) = self.teams.get_mut(key) else {
            debug!(
                "event=registry_update module=registry status=not_found collection={} key={}",
                self.collection_name, key
            );
            return false;
        };

        let topic_before = team.research_topic.clone();
        let time_frame_before = team.time_frame;
        mutate(&mut *team);

        let mut changed = Vec::new();
        if team.research_topic != topic_before {
            changed.push("research_topic");
        }
        if team.time_frame != time_frame_before {
            changed.push("time_frame");
        }
        let description = if changed.is_empty() {
            UPDATED_DESCRIPTION.to_string()
        } else {
            changed.join(",")
        };
        let registration_number = team.registration_number();
        debug!(
            "event=registry_update module=registry status=ok collection={} key={} changed={}",
            self.collection_name, key, description
        );

        self.emit(ChangeKind::Property, description, registration_number);
        true
    }

    pub fn get_by_key(&self, key: &TeamKey) -> Option<&ResearchTeam> {
        self.teams.get(key)
    }

    /// Latest paper timestamp across all stored teams.
    pub fn last_publication_date(&self) -> Option<DateTime<Utc>> {
        self.teams
            .values()
            .flat_map(|team| team.publications())
            .map(|paper| paper.published_at)
            .max()
    }

    /// Entries whose team runs for `time_frame`, in insertion order.
    pub fn time_frame_group(&self, time_frame: TimeFrame) -> Vec<(&TeamKey, &ResearchTeam)> {
        self.iter()
            .filter(|(_, team)| team.time_frame == time_frame)
            .collect()
    }

    /// Partitions all entries by time frame.
    ///
    /// Groups appear in order of their first entry; entries keep insertion order.
    pub fn time_frame_groups(&self) -> Vec<TimeFrameGroup<'_>> {
        let mut groups: Vec<TimeFrameGroup<'_>> = Vec::new();
        for (key, team) in self.iter() {
            match groups
                .iter_mut()
                .find(|(time_frame, _)| *time_frame == team.time_frame)
            {
                Some((_, entries)) => entries.push((key, team)),
                None => groups.push((team.time_frame, vec![(key, team)])),
            }
        }
        groups
    }

    /// One `key: summary` line per entry.
    pub fn short_description(&self) -> String {
        self.iter()
            .map(|(key, team)| format!("{key}: {}", team.short_description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn find_key_by_value(&self, team: &ResearchTeam) -> Option<TeamKey> {
        self.iter()
            .find(|(_, stored)| *stored == team)
            .map(|(key, _)| key.clone())
    }

    fn emit(&self, kind: ChangeKind, description: impl Into<String>, registration_number: i32) {
        let event = ChangeEvent::new(
            self.collection_name.as_str(),
            kind,
            description,
            registration_number,
        );
        self.subscribers.notify(&event);
    }
}

impl Display for TeamRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (key, team) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{key}: {team}")?;
        }
        Ok(())
    }
}
