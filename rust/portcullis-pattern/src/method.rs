use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::MalformedActions;

/// The fixed HTTP method vocabulary. A set equal to it is unbounded.
pub const STANDARD_METHODS: [&str; 7] = ["DELETE", "GET", "HEAD", "OPTIONS", "POST", "PUT", "TRACE"];

/// Prefix that turns a method list into an exception list.
pub const EXCEPTION_PREFIX: char = '!';

const METHOD_SEPARATOR: char = ',';

/// A canonicalized set of HTTP methods.
///
/// Duplicates are removed and methods are kept in ascending lexical order.
/// Method names are case-sensitive and extension methods are accepted
/// verbatim. When the set equals [`STANDARD_METHODS`] the canonical string
/// is `None`, meaning "all methods".
///
/// ```
/// use portcullis_pattern::HttpMethodSet;
///
/// let methods = HttpMethodSet::parse("POST,GET,POST").unwrap();
/// assert_eq!(methods.canonical(), Some("GET,POST"));
///
/// let all = HttpMethodSet::parse("").unwrap();
/// assert!(all.is_all());
/// assert_eq!(all.canonical(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpMethodSet {
    methods: BTreeSet<String>,
    canonical: Option<String>,
}

impl HttpMethodSet {
    /// The full standard vocabulary.
    pub fn all() -> Self {
        Self {
            methods: STANDARD_METHODS.iter().map(|method| method.to_string()).collect(),
            canonical: None,
        }
    }

    /// Parse a comma-separated method list. The empty string is shorthand for
    /// all methods. A leading `!` is not accepted here; see
    /// [`HttpMethodSpec::parse`].
    pub fn parse(methods: &str) -> Result<Self, MalformedActions> {
        if methods.is_empty() {
            return Ok(Self::all());
        }

        let mut tokens = Vec::new();
        for token in methods.split(METHOD_SEPARATOR) {
            if token.is_empty() {
                return Err(MalformedActions::EmptyMethod {
                    actions: methods.to_string(),
                });
            }
            tokens.push(token);
        }
        Self::from_methods(tokens)
    }

    /// Canonicalize an explicit list of method names. An empty list is
    /// shorthand for all methods.
    pub fn from_methods<I, S>(methods: I) -> Result<Self, MalformedActions>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for method in methods {
            let method = method.as_ref();
            validate_method(method)?;
            set.insert(method.to_string());
        }
        Ok(Self::from_set(set))
    }

    fn from_set(methods: BTreeSet<String>) -> Self {
        if methods.is_empty() || is_standard_vocabulary(&methods) {
            return Self::all();
        }

        let canonical = methods
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            methods,
            canonical: Some(canonical),
        }
    }

    /// The methods, ascending.
    pub fn methods(&self) -> impl ExactSizeIterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }

    /// Whether `method` is in the set.
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    /// The sorted comma-joined form, or `None` for the full vocabulary.
    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    /// Whether this set is the unbounded "all methods" set.
    pub fn is_all(&self) -> bool {
        self.canonical.is_none()
    }

    /// Whether every method in `self` is also in `other`.
    pub fn is_subset_of(&self, other: &HttpMethodSet) -> bool {
        self.methods.is_subset(&other.methods)
    }
}

impl Default for HttpMethodSet {
    fn default() -> Self {
        Self::all()
    }
}

fn is_standard_vocabulary(methods: &BTreeSet<String>) -> bool {
    methods.len() == STANDARD_METHODS.len()
        && STANDARD_METHODS.iter().all(|method| methods.contains(*method))
}

/// RFC 9110 `token`: visible ASCII minus delimiters.
fn validate_method(method: &str) -> Result<(), MalformedActions> {
    let is_tchar = |byte: u8| {
        byte.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&byte)
    };
    if method.is_empty() || !method.bytes().all(is_tchar) {
        return Err(MalformedActions::InvalidMethod {
            method: method.to_string(),
        });
    }
    Ok(())
}

/// The method part of a web permission's actions: either the methods the
/// permission covers, or an exception list of methods it does not cover.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethodSpec {
    /// A plain method list.
    Listed(HttpMethodSet),
    /// A `!`-prefixed list of excluded methods.
    Excepted(HttpMethodSet),
}

impl HttpMethodSpec {
    /// Parse `['!'] Method (',' Method)*` or the empty string. `None` and the
    /// empty string both mean all methods.
    pub fn parse(spec: Option<&str>) -> Result<Self, MalformedActions> {
        let Some(spec) = spec else {
            return Ok(Self::default());
        };

        match spec.strip_prefix(EXCEPTION_PREFIX) {
            Some("") => Err(MalformedActions::EmptyExceptionList),
            Some(excepted) => Ok(Self::Excepted(HttpMethodSet::parse(excepted)?)),
            None => Ok(Self::Listed(HttpMethodSet::parse(spec)?)),
        }
    }

    /// Whether this is an exception list.
    pub fn is_exception_list(&self) -> bool {
        matches!(self, Self::Excepted(_))
    }

    /// The listed methods, if this is not an exception list.
    pub fn listed(&self) -> Option<&HttpMethodSet> {
        match self {
            Self::Listed(methods) => Some(methods),
            Self::Excepted(_) => None,
        }
    }

    /// The excepted methods, if this is an exception list.
    pub fn excepted(&self) -> Option<&HttpMethodSet> {
        match self {
            Self::Listed(_) => None,
            Self::Excepted(methods) => Some(methods),
        }
    }

    /// Whether `self` covers at least the methods `other` covers.
    ///
    /// An exception list on `self` must be matched by an exception list on
    /// `other` (see [`match_exception_list`]). Two plain lists are compared by
    /// containment. An exception list on `other` is only implied by a plain
    /// list covering all methods.
    pub fn implies(&self, other: &HttpMethodSpec) -> bool {
        match (self, other) {
            (Self::Excepted(mine), _) => match_exception_list(Some(mine), other.excepted()),
            (Self::Listed(mine), Self::Listed(theirs)) => theirs.is_subset_of(mine),
            (Self::Listed(mine), Self::Excepted(_)) => mine.is_all(),
        }
    }

    /// The canonical actions form: `None` for all methods, the sorted list,
    /// or `!` followed by the sorted exception list.
    pub fn canonical(&self) -> Option<String> {
        match self {
            Self::Listed(methods) => methods.canonical().map(str::to_string),
            Self::Excepted(methods) => Some(format!(
                "{EXCEPTION_PREFIX}{}",
                methods
                    .canonical()
                    .map(str::to_string)
                    .unwrap_or_else(|| STANDARD_METHODS.join(","))
            )),
        }
    }
}

impl Default for HttpMethodSpec {
    fn default() -> Self {
        Self::Listed(HttpMethodSet::all())
    }
}

impl Display for HttpMethodSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical().as_deref().unwrap_or(""))
    }
}

/// Compare two optional exception lists.
///
/// Both absent matches, exactly one absent does not. When both are present
/// they must except exactly the same methods, so `!GET` implies neither
/// `!GET,POST` nor is implied by it.
pub fn match_exception_list(mine: Option<&HttpMethodSet>, theirs: Option<&HttpMethodSet>) -> bool {
    match (mine, theirs) {
        (None, None) => true,
        (Some(mine), Some(theirs)) => mine == theirs,
        _ => false,
    }
}
