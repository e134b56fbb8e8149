//! Research team domain model.
//!
//! # Responsibility
//! - Define the records stored by the team registry.
//! - Enforce construction-time invariants before records reach the registry.
//!
//! # Invariants
//! - Every `Team` carries a registration number greater than zero.
//! - Team identity is `organization + registration_number`, never object
//!   identity.

pub mod paper;
pub mod person;
pub mod research_team;
pub mod team;
