use std::fmt::{Display, Formatter};

use portcullis_pattern::{HttpMethodSet, HttpMethodSpec, UrlPatternSpec};
use tracing::debug;

use crate::{PermissionError, Request, request_name};

/// Permission to access a set of web resources with a set of HTTP methods.
///
/// The name is a URL pattern spec (`/app/*:/app/admin/*`) and the actions are
/// an HTTP method list (`GET,POST`) or exception list (`!DELETE`). An absent
/// name means `/`; absent or empty actions mean every method.
///
/// Two permissions are equal when each implies the other, which is why this
/// type implements [`PartialEq`] but not [`Hash`](std::hash::Hash).
#[derive(Debug, Clone)]
pub struct WebResourcePermission {
    name: String,
    url_spec: UrlPatternSpec,
    methods: HttpMethodSpec,
}

impl WebResourcePermission {
    /// Parse a permission from its name and actions strings.
    pub fn new(name: Option<&str>, actions: Option<&str>) -> Result<Self, PermissionError> {
        Self::parse(name, actions).inspect_err(|error| {
            debug!(?name, ?actions, %error, "Rejected web resource permission");
        })
    }

    fn parse(name: Option<&str>, actions: Option<&str>) -> Result<Self, PermissionError> {
        let url_spec = UrlPatternSpec::parse(name)?;
        let methods = HttpMethodSpec::parse(actions)?;
        Ok(Self {
            name: name.unwrap_or("/").to_string(),
            url_spec,
            methods,
        })
    }

    /// Build a permission from a name and an explicit list of methods. An
    /// empty list means every method.
    pub fn with_methods<I, S>(name: Option<&str>, methods: I) -> Result<Self, PermissionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let url_spec = UrlPatternSpec::parse(name)?;
        let methods = HttpMethodSet::from_methods(methods)?;
        Ok(Self {
            name: name.unwrap_or("/").to_string(),
            url_spec,
            methods: HttpMethodSpec::Listed(methods),
        })
    }

    /// The permission an incoming request needs: its context-relative path
    /// and its method.
    pub fn from_request<R: Request + ?Sized>(request: &R) -> Result<Self, PermissionError> {
        let name = request_name(request);
        Self::new(Some(name.as_str()), Some(request.method()))
    }

    /// The name as given, or `/` when it was absent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed name.
    pub fn url_spec(&self) -> &UrlPatternSpec {
        &self.url_spec
    }

    /// The parsed actions.
    pub fn methods(&self) -> &HttpMethodSpec {
        &self.methods
    }

    /// The canonical actions, `None` when every method is covered.
    pub fn actions(&self) -> Option<String> {
        self.methods.canonical()
    }

    /// Whether `self` grants every access `other` grants.
    pub fn implies(&self, other: &WebResourcePermission) -> bool {
        self.url_spec.implies(&other.url_spec) && self.methods.implies(&other.methods)
    }
}

impl PartialEq for WebResourcePermission {
    fn eq(&self, other: &Self) -> bool {
        self.implies(other) && other.implies(self)
    }
}

impl Display for WebResourcePermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "WebResourcePermission(\"{}\"", self.name)?;
        if let Some(actions) = self.actions() {
            write!(f, ", \"{actions}\"")?;
        }
        f.write_str(")")
    }
}
