use crate::PatternKind;

/// A URL pattern spec whose exclusion list violates the shape rules implied
/// by its primary pattern.
///
/// Construction fails as a whole; no partially validated spec is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPatternSpec {
    /// An exclusion matches the primary pattern, which would carve out the
    /// whole grant.
    #[error("Exclusion '{exclusion}' matches the primary pattern '{primary}'")]
    ExclusionMatchesPrimary {
        /// The primary pattern.
        primary: String,
        /// The offending exclusion.
        exclusion: String,
    },

    /// The exclusion's kind may not narrow a primary pattern of this kind.
    #[error("Exclusion '{exclusion}' of kind {kind} is not allowed under primary pattern '{primary}'")]
    ExclusionKindNotAllowed {
        /// The primary pattern.
        primary: String,
        /// The offending exclusion.
        exclusion: String,
        /// The kind of the offending exclusion.
        kind: PatternKind,
    },

    /// Exact primary patterns may not carry an exclusion list at all.
    #[error("Exact pattern '{primary}' cannot carry exclusion '{exclusion}'")]
    ExclusionOnExact {
        /// The primary pattern.
        primary: String,
        /// The first exclusion found.
        exclusion: String,
    },

    /// The same exclusion occurs more than once.
    #[error("Exclusion '{exclusion}' occurs more than once")]
    DuplicateExclusion {
        /// The repeated exclusion.
        exclusion: String,
    },
}

/// An actions string that does not fit the HTTP method or transport grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedActions {
    /// A comma-separated method list contains an empty entry.
    #[error("Empty method in '{actions}'")]
    EmptyMethod {
        /// The method list as given.
        actions: String,
    },

    /// A method token contains characters outside the HTTP token alphabet.
    #[error("Invalid HTTP method token '{method}'")]
    InvalidMethod {
        /// The rejected token.
        method: String,
    },

    /// A `!` with nothing after it.
    #[error("Exception list '!' names no methods")]
    EmptyExceptionList,

    /// A transport guarantee other than INTEGRAL, CONFIDENTIAL or NONE.
    #[error("Unknown transport type '{transport}'")]
    UnknownTransport {
        /// The rejected value.
        transport: String,
    },
}
