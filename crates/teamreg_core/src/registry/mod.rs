//! Keyed team registry with change notification.
//!
//! # Responsibility
//! - Keep research teams addressable by a derived `TeamKey`.
//! - Publish one `ChangeEvent` per successful mutation.
//!
//! # Invariants
//! - Keys are unique within one registry.
//! - A failed mutation neither changes state nor emits an event.
//! - Iteration follows insertion order.

pub mod key;
pub mod team_registry;
