//! Team identity model.
//!
//! # Invariants
//! - `registration_number > 0` for every constructed `Team`.
//! - Equality is `organization + registration_number`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors raised at the model boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamValidationError {
    /// Registration numbers must be strictly positive.
    InvalidRegistration(i32),
}

impl Display for TeamValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegistration(value) => write!(
                f,
                "registration number must be greater than 0, got {value}"
            ),
        }
    }
}

impl Error for TeamValidationError {}

/// Organization-level team identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTeam")]
pub struct Team {
    organization: String,
    registration_number: i32,
}

impl Team {
    /// Creates a team after validating the registration number.
    pub fn new(
        organization: impl Into<String>,
        registration_number: i32,
    ) -> Result<Self, TeamValidationError> {
        validate_registration(registration_number)?;
        Ok(Self {
            organization: organization.into(),
            registration_number,
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn set_organization(&mut self, organization: impl Into<String>) {
        self.organization = organization.into();
    }

    pub fn registration_number(&self) -> i32 {
        self.registration_number
    }

    /// Replaces the registration number; invalid values leave `self` untouched.
    pub fn set_registration_number(&mut self, value: i32) -> Result<(), TeamValidationError> {
        validate_registration(value)?;
        self.registration_number = value;
        Ok(())
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Team: Organization: {}, Registration Number: {}",
            self.organization, self.registration_number
        )
    }
}

/// Unvalidated wire shape; decoding goes through `Team::new`.
#[derive(Deserialize)]
struct RawTeam {
    organization: String,
    registration_number: i32,
}

impl TryFrom<RawTeam> for Team {
    type Error = TeamValidationError;

    fn try_from(value: RawTeam) -> Result<Self, Self::Error> {
        Self::new(value.organization, value.registration_number)
    }
}

fn validate_registration(value: i32) -> Result<(), TeamValidationError> {
    if value <= 0 {
        return Err(TeamValidationError::InvalidRegistration(value));
    }
    Ok(())
}
