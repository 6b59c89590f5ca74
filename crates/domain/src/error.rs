//! Common error types used across the workspace.
//!
//! Each layer defines typed errors and converts via `#[from]` — no `String`
//! variants.

/// Top-level error for the fan bridge.
#[derive(Debug, thiserror::Error)]
pub enum NhcError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced object does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A name field was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A device record carried no identifiers.
    #[error("device needs at least one identifier")]
    NoIdentifiers,
}

/// A lookup failed because the object is unknown.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of object that was looked up (e.g. `"Action"`).
    pub entity: &'static str,
    /// Identifier used for the lookup.
    pub id: String,
}
