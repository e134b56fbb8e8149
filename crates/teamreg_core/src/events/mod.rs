//! Change notification contracts shared by the registry and its observers.
//!
//! # Responsibility
//! - Define the immutable `ChangeEvent` emitted for every registry mutation.
//! - Hold subscriber handles and dispatch events synchronously.
//!
//! # Invariants
//! - Subscribers are notified in subscription order.
//! - Dispatch is synchronous; there is no queue and no retry.

pub mod change;
pub mod subscribers;
