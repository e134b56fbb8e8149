//! Research team record stored by the registry.
//!
//! # Responsibility
//! - Combine team identity with topic, time frame, members and papers.
//! - Provide publication queries used by registry aggregates.
//!
//! # Invariants
//! - Equality is the embedded `Team` identity only; topic, members and papers
//!   never participate.
//! - `add_members`/`add_papers` store owned copies, never shared references.

use crate::model::paper::Paper;
use crate::model::person::Person;
use crate::model::team::{Team, TeamValidationError};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Planned duration of a research program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    Year,
    TwoYears,
    Long,
}

impl TimeFrame {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::TwoYears => "two_years",
            Self::Long => "long",
        }
    }
}

impl Display for TimeFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Year => "Year",
            Self::TwoYears => "TwoYears",
            Self::Long => "Long",
        };
        f.write_str(label)
    }
}

/// Team record with research metadata, members and publications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchTeam {
    #[serde(flatten)]
    team: Team,
    pub research_topic: String,
    pub time_frame: TimeFrame,
    #[serde(default)]
    members: Vec<Person>,
    #[serde(default)]
    publications: Vec<Paper>,
}

impl ResearchTeam {
    /// Creates a team with no members and no publications.
    pub fn new(
        research_topic: impl Into<String>,
        organization: impl Into<String>,
        registration_number: i32,
        time_frame: TimeFrame,
    ) -> Result<Self, TeamValidationError> {
        Ok(Self {
            team: Team::new(organization, registration_number)?,
            research_topic: research_topic.into(),
            time_frame,
            members: Vec::new(),
            publications: Vec::new(),
        })
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Mutable identity access; setters on `Team` keep validating.
    pub fn team_mut(&mut self) -> &mut Team {
        &mut self.team
    }

    pub fn organization(&self) -> &str {
        self.team.organization()
    }

    pub fn registration_number(&self) -> i32 {
        self.team.registration_number()
    }

    pub fn members(&self) -> &[Person] {
        &self.members
    }

    pub fn publications(&self) -> &[Paper] {
        &self.publications
    }

    pub fn publication_count(&self) -> usize {
        self.publications.len()
    }

    pub fn is_in_time_frame(&self, time_frame: TimeFrame) -> bool {
        self.time_frame == time_frame
    }

    pub fn add_members<'a>(&mut self, members: impl IntoIterator<Item = &'a Person>) {
        self.members.extend(members.into_iter().cloned());
    }

    pub fn add_papers<'a>(&mut self, papers: impl IntoIterator<Item = &'a Paper>) {
        self.publications.extend(papers.into_iter().cloned());
    }

    /// Returns the most recent paper; the earliest-added one wins ties.
    pub fn latest_publication(&self) -> Option<&Paper> {
        let mut latest: Option<&Paper> = None;
        for paper in &self.publications {
            match latest {
                Some(current) if paper.published_at <= current.published_at => {}
                _ => latest = Some(paper),
            }
        }
        latest
    }

    /// Members who authored at least one of this team's papers, in member order.
    pub fn members_with_publications(&self) -> impl Iterator<Item = &Person> + '_ {
        self.members.iter().filter(move |member| {
            self.publications
                .iter()
                .any(|paper| &paper.author == *member)
        })
    }

    /// Authors with more than one paper, in order of their first paper.
    pub fn members_with_multiple_publications(&self) -> Vec<&Person> {
        let mut counts: Vec<(&Person, usize)> = Vec::new();
        for paper in &self.publications {
            match counts.iter_mut().find(|(author, _)| *author == &paper.author) {
                Some((_, count)) => *count += 1,
                None => counts.push((&paper.author, 1)),
            }
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(author, _)| author)
            .collect()
    }

    /// Papers published no more than `years` calendar years before `now`.
    pub fn recent_publications(
        &self,
        years: i32,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &Paper> + '_ {
        let current_year = now.year();
        self.publications
            .iter()
            .filter(move |paper| current_year - paper.published_at.year() <= years)
    }

    pub fn sort_publications_by_date(&mut self) {
        self.publications
            .sort_by(|left, right| left.published_at.cmp(&right.published_at));
    }

    pub fn sort_publications_by_title(&mut self) {
        self.publications.sort_by(Paper::cmp_title_ci);
    }

    pub fn sort_publications_by_author(&mut self) {
        self.publications.sort_by(Paper::cmp_author_ci);
    }

    /// One-line summary without members and papers.
    pub fn short_description(&self) -> String {
        format!(
            "ResearchTeam: Organization: {}, Registration Number: {}, Research Topic: {}, TimeFrame: {}",
            self.organization(),
            self.registration_number(),
            self.research_topic,
            self.time_frame
        )
    }
}

impl PartialEq for ResearchTeam {
    fn eq(&self, other: &Self) -> bool {
        self.team == other.team
    }
}

impl Eq for ResearchTeam {}

impl Display for ResearchTeam {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.short_description())?;
        let members = self
            .members
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Members: {members}")?;
        write!(f, "Publications:")?;
        for paper in &self.publications {
            write!(f, "\n{paper}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ResearchTeam, TimeFrame};
    use crate::model::paper::Paper;
    use crate::model::person::Person;
    use chrono::{TimeZone, Utc};

    fn team() -> ResearchTeam {
        ResearchTeam::new("Topic", "Org", 1, TimeFrame::Year).expect("valid team")
    }

    #[test]
    fn equality_uses_identity_only() {
        let mut other = team();
        other.research_topic = "Different".to_string();
        other.time_frame = TimeFrame::Long;
        assert_eq!(team(), other);
    }

    #[test]
    fn latest_publication_prefers_first_on_ties() {
        let mut team = team();
        let author = Person::new("Ada", "Lovelace");
        let when = Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap();
        team.add_papers(&[
            Paper::new("first", author.clone(), when),
            Paper::new("second", author, when),
        ]);
        assert_eq!(team.latest_publication().unwrap().title, "first");
    }

    #[test]
    fn latest_publication_is_none_without_papers() {
        assert!(team().latest_publication().is_none());
    }

    #[test]
    fn time_frame_labels() {
        assert_eq!(TimeFrame::TwoYears.to_string(), "TwoYears");
        assert_eq!(TimeFrame::TwoYears.as_str(), "two_years");
    }
}
