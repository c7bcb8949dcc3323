use serde::{Deserialize, Serialize};

/// Replacement for `:` in names derived from request paths, so a literal
/// colon is not read as a pattern separator.
pub const ENCODED_COLON: &str = "%3A";

/// The parts of an incoming HTTP request that web permissions are derived
/// from.
pub trait Request {
    /// The HTTP method, e.g. `GET`.
    fn method(&self) -> &str;

    /// Whether the request arrived over a confidential transport.
    fn is_secure(&self) -> bool;

    /// The full request path, including the context path.
    fn path(&self) -> &str;

    /// The path prefix the application is deployed under, or `""`.
    fn context_path(&self) -> &str;
}

/// An owned [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: String,
    /// The full request path.
    pub path: String,
    /// The deployment prefix.
    #[serde(default)]
    pub context_path: String,
    /// Whether the transport is confidential.
    #[serde(default)]
    pub secure: bool,
}

impl HttpRequest {
    /// A plain-transport request with no context path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the deployment prefix.
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// Mark the request as arriving over a confidential transport.
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }
}

impl Request for HttpRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn is_secure(&self) -> bool {
        self.secure
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn context_path(&self) -> &str {
        &self.context_path
    }
}

/// Derive the permission name for a request.
///
/// The context path is stripped, a remaining `/` becomes the empty string
/// (the context root), and every `:` is escaped as [`ENCODED_COLON`].
pub fn request_name<R: Request + ?Sized>(request: &R) -> String {
    let path = request.path();
    let relative = path.strip_prefix(request.context_path()).unwrap_or(path);
    if relative == "/" {
        String::new()
    } else {
        relative.replace(':', ENCODED_COLON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_strips_the_context_path() {
        let request = HttpRequest::new("GET", "/shop/cart/items").with_context_path("/shop");
        assert_eq!(request_name(&request), "/cart/items");
    }

    #[test]
    fn it_maps_the_context_root_to_the_empty_name() {
        assert_eq!(request_name(&HttpRequest::new("GET", "/shop/").with_context_path("/shop")), "");
        assert_eq!(request_name(&HttpRequest::new("GET", "/")), "");
        assert_eq!(request_name(&HttpRequest::new("GET", "/shop").with_context_path("/shop")), "");
    }

    #[test]
    fn it_escapes_colons() {
        let request = HttpRequest::new("GET", "/ctx/a:b:c").with_context_path("/ctx");
        assert_eq!(request_name(&request), "/a%3Ab%3Ac");
    }

    #[test]
    fn it_leaves_paths_outside_the_context_alone() {
        let request = HttpRequest::new("GET", "/other/page").with_context_path("/shop");
        assert_eq!(request_name(&request), "/other/page");
    }
}
