#![warn(missing_docs)]

//! Permission descriptors for web resources and application components,
//! and the implication relation between them.
//!
//! A permission is built from a name and an actions string. Web permissions
//! take a URL pattern spec as their name and an HTTP method list (plus, for
//! user-data permissions, a transport guarantee) as their actions:
//!
//! - [`WebResourcePermission`] grants access to URL patterns with HTTP methods.
//! - [`WebUserDataPermission`] additionally requires a transport guarantee.
//! - [`MethodPermission`] grants invocation of component methods.
//! - [`RoleRefPermission`] covers role references made from within a component.
//!
//! `a.implies(&b)` holds when everything `b` authorizes is also authorized
//! by `a`. Equality is mutual implication, so none of these types implement
//! [`Hash`](std::hash::Hash).
//!
//! [`Permission`] wraps the four descriptors behind one type tag, and
//! [`PermissionSet`] and [`Policy`] evaluate a requested permission against
//! collections of granted ones.
//!
//! # Example
//!
//! ```rust
//! use portcullis_permission::{HttpRequest, WebResourcePermission, WebUserDataPermission};
//!
//! let request = HttpRequest::new("GET", "/shop/cart").with_context_path("/shop");
//!
//! let grant = WebResourcePermission::new(Some("/*:/admin/*"), Some("GET,HEAD")).unwrap();
//! assert!(grant.implies(&WebResourcePermission::from_request(&request).unwrap()));
//!
//! let guarantee = WebUserDataPermission::new(Some("/cart"), Some(":CONFIDENTIAL")).unwrap();
//! assert!(!guarantee.implies(&WebUserDataPermission::from_request(&request).unwrap()));
//! assert!(guarantee.implies(&WebUserDataPermission::from_request(&request.secure()).unwrap()));
//! ```

mod error;
pub use error::*;

mod request;
pub use request::*;

mod resource;
pub use resource::*;

mod user_data;
pub use user_data::*;

mod method;
pub use method::*;

mod role_ref;
pub use role_ref::*;

mod permission;
pub use permission::*;

mod set;
pub use set::*;

mod policy;
pub use policy::*;
