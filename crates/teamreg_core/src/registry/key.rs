//! Registry key derivation and parsing.

use crate::model::research_team::ResearchTeam;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::error::Error;
use std::fmt::{Display, Formatter};

// Greedy organization match: the registration number is the trailing `_<digits>`.
static TEAM_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?s)(.*)_([0-9]+)$").expect("valid team key regex"));

/// Key parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    /// Input is not `<organization>_<registration number>`.
    Malformed(String),
}

impl Display for KeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "malformed team key: `{value}`"),
        }
    }
}

impl Error for KeyParseError {}

/// Deterministic registry key, `"<organization>_<registration number>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamKey(String);

impl TeamKey {
    pub fn new(organization: &str, registration_number: i32) -> Self {
        Self(format!("{organization}_{registration_number}"))
    }

    /// Derives the key a team would be stored under.
    pub fn derive(team: &ResearchTeam) -> Self {
        Self::new(team.organization(), team.registration_number())
    }

    /// Splits a key into `(organization, registration_number)`.
    ///
    /// Organizations may contain `_`; only the trailing digits are taken as
    /// the registration number.
    pub fn parse(value: &str) -> Result<(String, i32), KeyParseError> {
        let malformed = || KeyParseError::Malformed(value.to_string());
        let captures = TEAM_KEY_RE.captures(value).ok_or_else(malformed)?;
        let organization = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .ok_or_else(malformed)?;
        let registration_number = captures
            .get(2)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .ok_or_else(malformed)?;
        Ok((organization, registration_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TeamKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for TeamKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
