use portcullis_pattern::{InvalidPatternSpec, MalformedActions};

use crate::PermissionKind;

/// Errors raised while constructing a permission.
///
/// Construction either fully succeeds or fails with one of these; no
/// partially parsed permission is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// The permission name is not a valid URL pattern spec.
    #[error("Invalid URL pattern spec: {0}")]
    PatternSpec(#[from] InvalidPatternSpec),

    /// The actions string does not fit the method or transport grammar.
    #[error("Malformed actions: {0}")]
    Actions(#[from] MalformedActions),

    /// Component permissions have no default name.
    #[error("Permission of kind {kind} requires a name")]
    MissingName {
        /// The kind being constructed.
        kind: PermissionKind,
    },

    /// A role reference was declared without the role it refers to.
    #[error("Role reference '{name}' does not name a role")]
    MissingRole {
        /// The servlet or component name.
        name: String,
    },

    /// The permission type tag is not one this crate knows.
    #[error("Unknown permission type '{kind}'")]
    UnknownKind {
        /// The rejected tag.
        kind: String,
    },
}
