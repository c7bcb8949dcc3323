use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{InvalidPatternSpec, PatternKind, UrlPattern};

/// Separator between the primary pattern and each exclusion.
pub const PATTERN_SEPARATOR: char = ':';

/// A primary [`UrlPattern`] narrowed by a set of excluded patterns.
///
/// The textual form is `Pattern (':' Pattern)*`: the first pattern names the
/// resources the permission covers and every following pattern carves a
/// subset of them back out. Every segment is a pattern, including empty
/// ones, since the empty string is a legal exact pattern.
///
/// ```
/// use portcullis_pattern::UrlPatternSpec;
///
/// let admin_only_hidden: UrlPatternSpec = "/:/admin/*".parse().unwrap();
/// let everything = UrlPatternSpec::default();
///
/// assert!(everything.implies(&admin_only_hidden));
/// assert!(!admin_only_hidden.implies(&everything));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlPatternSpec {
    primary: UrlPattern,
    exclusions: BTreeSet<UrlPattern>,
}

impl UrlPatternSpec {
    /// Parse a spec, treating an absent spec as the default pattern `/`.
    pub fn parse(spec: Option<&str>) -> Result<Self, InvalidPatternSpec> {
        match spec {
            Some(spec) => spec.parse(),
            None => Ok(Self::default()),
        }
    }

    /// Build a spec from an already split primary and exclusion list,
    /// enforcing the same shape rules as parsing.
    pub fn new<I>(primary: UrlPattern, exclusions: I) -> Result<Self, InvalidPatternSpec>
    where
        I: IntoIterator<Item = UrlPattern>,
    {
        let mut checked = BTreeSet::new();
        for exclusion in exclusions {
            check_exclusion(&primary, &exclusion)?;
            if checked.contains(&exclusion) {
                return Err(InvalidPatternSpec::DuplicateExclusion {
                    exclusion: exclusion.to_string(),
                });
            }
            checked.insert(exclusion);
        }

        Ok(Self {
            primary,
            exclusions: checked,
        })
    }

    /// The first pattern of the spec.
    pub fn primary(&self) -> &UrlPattern {
        &self.primary
    }

    /// The excluded patterns, in ascending order.
    pub fn exclusions(&self) -> impl ExactSizeIterator<Item = &UrlPattern> {
        self.exclusions.iter()
    }

    /// Whether every resource granted by `other` is also granted by `self`.
    ///
    /// 1. `self`'s primary must match `other`'s primary.
    /// 2. None of `self`'s exclusions may match `other`'s primary.
    /// 3. If `other`'s primary also matches `self`'s primary (the two grants
    ///    are equally broad at the root), each of `self`'s exclusions must be
    ///    matched by one of `other`'s exclusions. An empty exclusion list on
    ///    `other` cannot cover a non-empty one on `self`.
    pub fn implies(&self, other: &UrlPatternSpec) -> bool {
        if !self.primary.matches_pattern(&other.primary) {
            return false;
        }

        if self
            .exclusions
            .iter()
            .any(|exclusion| exclusion.matches_pattern(&other.primary))
        {
            return false;
        }

        if self.exclusions.is_empty() || !other.primary.matches_pattern(&self.primary) {
            return true;
        }

        self.exclusions.iter().all(|mine| {
            other
                .exclusions
                .iter()
                .any(|theirs| theirs.matches_pattern(mine))
        })
    }
}

fn check_exclusion(primary: &UrlPattern, exclusion: &UrlPattern) -> Result<(), InvalidPatternSpec> {
    if exclusion.matches_pattern(primary) {
        return Err(InvalidPatternSpec::ExclusionMatchesPrimary {
            primary: primary.to_string(),
            exclusion: exclusion.to_string(),
        });
    }

    let allowed = match primary.kind() {
        PatternKind::WildcardPrefix | PatternKind::PathPrefix | PatternKind::Extension => {
            matches!(exclusion.kind(), PatternKind::Exact) || exclusion.kind().is_prefix()
        }
        PatternKind::Default => exclusion.kind() != PatternKind::Default,
        PatternKind::Exact => {
            return Err(InvalidPatternSpec::ExclusionOnExact {
                primary: primary.to_string(),
                exclusion: exclusion.to_string(),
            });
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(InvalidPatternSpec::ExclusionKindNotAllowed {
            primary: primary.to_string(),
            exclusion: exclusion.to_string(),
            kind: exclusion.kind(),
        })
    }
}

impl Default for UrlPatternSpec {
    fn default() -> Self {
        Self {
            primary: UrlPattern::default_pattern(),
            exclusions: BTreeSet::new(),
        }
    }
}

impl FromStr for UrlPatternSpec {
    type Err = InvalidPatternSpec;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut segments = spec.split(PATTERN_SEPARATOR).map(UrlPattern::new);
        // `split` always yields at least one segment.
        let primary = segments.next().unwrap_or_else(|| UrlPattern::new(""));
        Self::new(primary, segments)
    }
}

impl TryFrom<String> for UrlPatternSpec {
    type Error = InvalidPatternSpec;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        spec.parse()
    }
}

impl From<UrlPatternSpec> for String {
    fn from(spec: UrlPatternSpec) -> Self {
        spec.to_string()
    }
}

impl Display for UrlPatternSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.primary)?;
        for exclusion in &self.exclusions {
            write!(f, "{PATTERN_SEPARATOR}{exclusion}")?;
        }
        Ok(())
    }
}
