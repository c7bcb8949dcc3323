use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The Servlet pattern category a [`UrlPattern`] falls into.
///
/// Classification is lexical and case-sensitive, see [`PatternKind::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    /// The default pattern `/`, which matches every path.
    Default,
    /// Any pattern starting with `/*`, which also matches every path.
    WildcardPrefix,
    /// A `/.../*` pattern matching a path and everything below it.
    PathPrefix,
    /// A `*.ext` pattern matching paths that end with `.ext`.
    Extension,
    /// Anything else; matches only the identical string.
    Exact,
}

impl PatternKind {
    /// Classify a raw pattern string.
    ///
    /// Rules are tried in order: exactly `/` is [`Default`](Self::Default),
    /// a `/*` prefix is [`WildcardPrefix`](Self::WildcardPrefix), a leading
    /// `/` with a trailing `/*` is [`PathPrefix`](Self::PathPrefix), a `*.`
    /// prefix is [`Extension`](Self::Extension), and everything else
    /// (including the empty string) is [`Exact`](Self::Exact).
    pub fn classify(pattern: &str) -> Self {
        if pattern == "/" {
            Self::Default
        } else if pattern.starts_with("/*") {
            Self::WildcardPrefix
        } else if pattern.starts_with('/') && pattern.ends_with("/*") {
            Self::PathPrefix
        } else if pattern.starts_with("*.") {
            Self::Extension
        } else {
            Self::Exact
        }
    }

    /// Both `/*` and `/.../*` patterns are prefix patterns.
    pub fn is_prefix(&self) -> bool {
        matches!(self, Self::WildcardPrefix | Self::PathPrefix)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::WildcardPrefix => "wildcard-prefix",
            Self::PathPrefix => "path-prefix",
            Self::Extension => "extension",
            Self::Exact => "exact",
        }
    }
}

impl Display for PatternKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single URL pattern, as it appears in a web permission name.
///
/// ```
/// use portcullis_pattern::UrlPattern;
///
/// let pattern = UrlPattern::new("/foo/*");
/// assert!(pattern.matches("/foo"));
/// assert!(pattern.matches("/foo/bar"));
/// assert!(!pattern.matches("/foobar"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct UrlPattern {
    pattern: String,
    kind: PatternKind,
}

impl UrlPattern {
    /// Wrap a raw pattern string, classifying it once.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let kind = PatternKind::classify(&pattern);
        Self { pattern, kind }
    }

    /// The default pattern `/`.
    pub fn default_pattern() -> Self {
        Self::new("/")
    }

    /// The raw pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The pattern category.
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Whether this pattern authorizes `candidate`, which is either a request
    /// path or the raw string of another pattern.
    ///
    /// The relation is asymmetric: `self` is the authorizing side.
    pub fn matches(&self, candidate: &str) -> bool {
        match self.kind {
            PatternKind::Default | PatternKind::WildcardPrefix => true,
            // Compare against the pattern minus the leading `*`.
            PatternKind::Extension => candidate.ends_with(&self.pattern[1..]),
            PatternKind::PathPrefix => {
                let prefix = &self.pattern[..self.pattern.len() - 2];
                candidate.starts_with(prefix)
                    && matches!(candidate.as_bytes().get(prefix.len()), None | Some(b'/'))
            }
            PatternKind::Exact => self.pattern == candidate,
        }
    }

    /// Same as [`UrlPattern::matches`] with another pattern as the candidate.
    pub fn matches_pattern(&self, other: &UrlPattern) -> bool {
        self.matches(&other.pattern)
    }
}

impl From<String> for UrlPattern {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

impl From<&str> for UrlPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<UrlPattern> for String {
    fn from(pattern: UrlPattern) -> Self {
        pattern.pattern
    }
}

impl Display for UrlPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_classifies_patterns_in_priority_order() {
        assert_eq!(PatternKind::classify("/"), PatternKind::Default);
        assert_eq!(PatternKind::classify("/*"), PatternKind::WildcardPrefix);
        // A `/*` prefix wins over the extension and path-prefix rules.
        assert_eq!(PatternKind::classify("/*.jsp"), PatternKind::WildcardPrefix);
        assert_eq!(PatternKind::classify("/foo/*"), PatternKind::PathPrefix);
        assert_eq!(PatternKind::classify("/a/b/c/*"), PatternKind::PathPrefix);
        assert_eq!(PatternKind::classify("*.jsp"), PatternKind::Extension);
        assert_eq!(PatternKind::classify("/foo"), PatternKind::Exact);
        assert_eq!(PatternKind::classify("/foo/"), PatternKind::Exact);
        assert_eq!(PatternKind::classify("foo/*"), PatternKind::Exact);
        assert_eq!(PatternKind::classify("*jsp"), PatternKind::Exact);
        assert_eq!(PatternKind::classify(""), PatternKind::Exact);
    }

    #[test]
    fn it_matches_everything_with_default_and_wildcard() {
        for candidate in ["", "/", "/a", "/a/b.jsp", "*.jsp", "/x/*", "anything"] {
            assert!(UrlPattern::new("/").matches(candidate), "{candidate}");
            assert!(UrlPattern::new("/*").matches(candidate), "{candidate}");
        }
    }

    #[test]
    fn it_matches_path_prefixes_on_segment_boundaries() {
        let pattern = UrlPattern::new("/foo/*");
        assert!(pattern.matches("/foo"));
        assert!(pattern.matches("/foo/"));
        assert!(pattern.matches("/foo/bar"));
        assert!(pattern.matches("/foo/bar/baz.jsp"));
        assert!(pattern.matches("/foo/*"));
        assert!(pattern.matches("/foo/bar/*"));
        assert!(!pattern.matches("/foobar"));
        assert!(!pattern.matches("/fo"));
        assert!(!pattern.matches("/Foo/bar"));
        assert!(!pattern.matches("/*"));
    }

    #[test]
    fn it_matches_extensions_by_suffix() {
        let pattern = UrlPattern::new("*.jsp");
        assert!(pattern.matches("/a/b.jsp"));
        assert!(pattern.matches("*.jsp"));
        assert!(pattern.matches(".jsp"));
        assert!(!pattern.matches("/a/b.jspx"));
        assert!(!pattern.matches("/a/b.JSP"));
    }

    #[test]
    fn it_matches_exact_patterns_only_by_identity() {
        let pattern = UrlPattern::new("/now/");
        assert!(pattern.matches("/now/"));
        assert!(!pattern.matches("/now"));
        assert!(!pattern.matches("/now/later"));

        let empty = UrlPattern::new("");
        assert!(empty.matches(""));
        assert!(!empty.matches("/"));
    }

    #[test]
    fn it_serializes_as_the_raw_string() -> testresult::TestResult {
        let pattern = UrlPattern::new("/foo/*");
        let json = serde_json::to_string(&pattern)?;
        assert_eq!(json, "\"/foo/*\"");

        let decoded: UrlPattern = serde_json::from_str(&json)?;
        assert_eq!(decoded.kind(), PatternKind::PathPrefix);
        assert_eq!(decoded, pattern);
        Ok(())
    }
}
