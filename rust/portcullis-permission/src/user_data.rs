use std::fmt::{Display, Formatter};

use portcullis_pattern::{HttpMethodSet, HttpMethodSpec, TransportType, UrlPatternSpec};
use tracing::debug;

use crate::{PermissionError, Request, request_name};

const TRANSPORT_SEPARATOR: char = ':';

/// Permission to access web resources over a given transport.
///
/// Actions follow `HTTPMethodSpec [':' TransportType]`, where the transport
/// type is `INTEGRAL`, `CONFIDENTIAL` or `NONE`. `NONE` and an omitted
/// transport both leave the transport unconstrained.
///
/// ```
/// use portcullis_permission::WebUserDataPermission;
///
/// let confidential = WebUserDataPermission::new(Some("/account/*"), Some(":CONFIDENTIAL")).unwrap();
/// let request = WebUserDataPermission::new(Some("/account/settings"), Some("GET:CONFIDENTIAL")).unwrap();
/// assert!(confidential.implies(&request));
///
/// let plain = WebUserDataPermission::new(Some("/account/settings"), Some("GET")).unwrap();
/// assert!(!confidential.implies(&plain));
/// ```
#[derive(Debug, Clone)]
pub struct WebUserDataPermission {
    name: String,
    url_spec: UrlPatternSpec,
    methods: HttpMethodSpec,
    transport: Option<TransportType>,
}

impl WebUserDataPermission {
    /// Parse a permission from its name and actions strings.
    pub fn new(name: Option<&str>, actions: Option<&str>) -> Result<Self, PermissionError> {
        Self::parse(name, actions).inspect_err(|error| {
            debug!(?name, ?actions, %error, "Rejected web user data permission");
        })
    }

    fn parse(name: Option<&str>, actions: Option<&str>) -> Result<Self, PermissionError> {
        let url_spec = UrlPatternSpec::parse(name)?;
        let (methods, transport) = match actions.and_then(|a| a.split_once(TRANSPORT_SEPARATOR)) {
            Some((methods, transport)) => (Some(methods), TransportType::parse(transport)?),
            None => (actions, None),
        };

        Ok(Self {
            name: name.unwrap_or("/").to_string(),
            url_spec,
            methods: HttpMethodSpec::parse(methods)?,
            transport,
        })
    }

    /// Build a permission from a name, an explicit method list and an
    /// optional transport guarantee.
    pub fn with_methods<I, S>(
        name: Option<&str>,
        methods: I,
        transport: Option<TransportType>,
    ) -> Result<Self, PermissionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            name: name.unwrap_or("/").to_string(),
            url_spec: UrlPatternSpec::parse(name)?,
            methods: HttpMethodSpec::Listed(HttpMethodSet::from_methods(methods)?),
            transport,
        })
    }

    /// The permission an incoming request needs. Requests over a secure
    /// transport carry `CONFIDENTIAL`.
    pub fn from_request<R: Request + ?Sized>(request: &R) -> Result<Self, PermissionError> {
        let name = request_name(request);
        let actions = if request.is_secure() {
            format!("{}{TRANSPORT_SEPARATOR}{}", request.method(), TransportType::Confidential)
        } else {
            request.method().to_string()
        };
        Self::new(Some(name.as_str()), Some(actions.as_str()))
    }

    /// The name as given, or `/` when it was absent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed name.
    pub fn url_spec(&self) -> &UrlPatternSpec {
        &self.url_spec
    }

    /// The parsed method part of the actions.
    pub fn methods(&self) -> &HttpMethodSpec {
        &self.methods
    }

    /// The required transport, `None` when unconstrained.
    pub fn transport(&self) -> Option<TransportType> {
        self.transport
    }

    /// The canonical actions: the method part, suffixed with `:TRANSPORT`
    /// when a transport is required. All methods with no transport is `None`.
    pub fn actions(&self) -> Option<String> {
        match (self.methods.canonical(), self.transport) {
            (Some(methods), Some(transport)) => {
                Some(format!("{methods}{TRANSPORT_SEPARATOR}{transport}"))
            }
            (Some(methods), None) => Some(methods),
            (None, Some(transport)) => Some(format!("{TRANSPORT_SEPARATOR}{transport}")),
            (None, None) => None,
        }
    }

    /// Whether `self` grants every access `other` grants. A required
    /// transport must be required identically by `other`.
    pub fn implies(&self, other: &WebUserDataPermission) -> bool {
        self.url_spec.implies(&other.url_spec)
            && self.methods.implies(&other.methods)
            && self
                .transport
                .is_none_or(|transport| other.transport == Some(transport))
    }
}

impl PartialEq for WebUserDataPermission {
    fn eq(&self, other: &Self) -> bool {
        self.implies(other) && other.implies(self)
    }
}

impl Display for WebUserDataPermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "WebUserDataPermission(\"{}\"", self.name)?;
        if let Some(actions) = self.actions() {
            write!(f, ", \"{actions}\"")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HttpRequest;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn permission(name: &str, actions: Option<&str>) -> WebUserDataPermission {
        WebUserDataPermission::new(Some(name), actions).unwrap()
    }

    #[test]
    fn it_splits_methods_and_transport() -> TestResult {
        let permission = WebUserDataPermission::new(Some("/a"), Some("POST,GET:INTEGRAL"))?;
        assert_eq!(permission.transport(), Some(TransportType::Integral));
        assert_eq!(permission.methods().listed().and_then(HttpMethodSet::canonical), Some("GET,POST"));
        assert_eq!(permission.actions(), Some("GET,POST:INTEGRAL".into()));
        Ok(())
    }

    #[test]
    fn it_treats_none_as_no_transport() -> TestResult {
        let explicit = WebUserDataPermission::new(Some("/a"), Some("GET:NONE"))?;
        let omitted = WebUserDataPermission::new(Some("/a"), Some("GET"))?;
        assert_eq!(explicit.transport(), None);
        assert_eq!(explicit.actions(), Some("GET".into()));
        assert_eq!(explicit, omitted);
        Ok(())
    }

    #[test]
    fn it_renders_transport_only_actions() -> TestResult {
        assert_eq!(
            WebUserDataPermission::new(None, Some(":CONFIDENTIAL"))?.actions(),
            Some(":CONFIDENTIAL".into())
        );
        assert_eq!(
            WebUserDataPermission::new(None, Some("DELETE,GET,HEAD,OPTIONS,POST,PUT,TRACE:INTEGRAL"))?.actions(),
            Some(":INTEGRAL".into())
        );
        assert_eq!(WebUserDataPermission::new(None, None)?.actions(), None);
        assert_eq!(WebUserDataPermission::new(None, Some("!PUT:INTEGRAL"))?.actions(), Some("!PUT:INTEGRAL".into()));
        Ok(())
    }

    #[test]
    fn it_rejects_unknown_transports() {
        assert!(matches!(
            WebUserDataPermission::new(Some("/a"), Some("GET:SECRET")),
            Err(PermissionError::Actions(_))
        ));
        assert!(WebUserDataPermission::new(Some("/a"), Some("GET:")).is_err());
    }

    #[test]
    fn it_requires_matching_transport_when_constrained() {
        let confidential = permission("/*", Some(":CONFIDENTIAL"));
        assert!(confidential.implies(&permission("/a", Some("GET:CONFIDENTIAL"))));
        assert!(!confidential.implies(&permission("/a", Some("GET:INTEGRAL"))));
        assert!(!confidential.implies(&permission("/a", Some("GET"))));

        let unconstrained = permission("/*", None);
        assert!(unconstrained.implies(&permission("/a", Some("GET:CONFIDENTIAL"))));
        assert!(unconstrained.implies(&permission("/a", Some("GET:INTEGRAL"))));
        assert!(!permission("/a", Some("GET:CONFIDENTIAL")).implies(&unconstrained));
    }

    #[test]
    fn it_applies_resource_rules_before_transport() {
        let grant = permission("/a/*", Some("GET:INTEGRAL"));
        assert!(!grant.implies(&permission("/b", Some("GET:INTEGRAL"))));
        assert!(!grant.implies(&permission("/a/x", Some("POST:INTEGRAL"))));
        assert!(!permission("/", Some("!GET:INTEGRAL")).implies(&permission("/", Some("!GET,POST:INTEGRAL"))));
    }

    #[test]
    fn it_derives_from_requests() -> TestResult {
        let secure = HttpRequest::new("POST", "/ctx/pay").with_context_path("/ctx").secure();
        let needed = WebUserDataPermission::from_request(&secure)?;
        assert_eq!(needed.name(), "/pay");
        assert_eq!(needed.actions(), Some("POST:CONFIDENTIAL".into()));

        let plain = WebUserDataPermission::from_request(&HttpRequest::new("POST", "/pay"))?;
        assert_eq!(plain.actions(), Some("POST".into()));

        let guarantee = permission("/pay", Some(":CONFIDENTIAL"));
        assert!(guarantee.implies(&needed));
        assert!(!guarantee.implies(&plain));
        Ok(())
    }

    #[test]
    fn it_builds_from_method_lists() -> TestResult {
        let permission =
            WebUserDataPermission::with_methods(Some("/a"), ["GET"], Some(TransportType::Confidential))?;
        assert_eq!(permission.actions(), Some("GET:CONFIDENTIAL".into()));
        assert_eq!(permission.to_string(), "WebUserDataPermission(\"/a\", \"GET:CONFIDENTIAL\")");
        Ok(())
    }
}
