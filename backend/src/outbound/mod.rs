//! Outbound adapters implementing domain ports for infrastructure.
//!
//! Adapters are thin translators between domain types and whatever sits on
//! the other side of a port. They contain no business logic; visibility and
//! ownership decisions stay in the domain layer.

pub mod persistence;
