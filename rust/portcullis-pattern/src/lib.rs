#![warn(missing_docs)]

//! Matching primitives for web and component permissions.
//!
//! This crate holds the string grammars that permission names and actions
//! are written in, and the relations between them:
//!
//! - [`UrlPattern`] classifies a single Servlet-style URL pattern and decides
//!   whether it authorizes a path or another pattern.
//! - [`UrlPatternSpec`] is a primary pattern narrowed by a set of excluded
//!   patterns (`/app/*:/app/admin/*`). It enforces the shape rules for
//!   exclusions at construction and implements implication between specs.
//! - [`HttpMethodSet`] and [`HttpMethodSpec`] canonicalize HTTP method lists
//!   (`GET,POST`) and exception lists (`!DELETE`).
//! - [`TransportType`] is the `INTEGRAL` / `CONFIDENTIAL` guarantee carried
//!   by user-data permissions.
//!
//! Everything here is immutable once constructed and every relation is a
//! pure function, so values can be shared freely across threads.
//!
//! # Example
//!
//! ```rust
//! use portcullis_pattern::{HttpMethodSpec, UrlPatternSpec};
//!
//! let granted: UrlPatternSpec = "/shop/*:/shop/admin/*".parse().unwrap();
//! let requested: UrlPatternSpec = "/shop/cart".parse().unwrap();
//! assert!(granted.implies(&requested));
//!
//! let methods = HttpMethodSpec::parse(Some("POST,GET")).unwrap();
//! assert_eq!(methods.canonical().as_deref(), Some("GET,POST"));
//! ```

mod error;
pub use error::*;

mod url_pattern;
pub use url_pattern::*;

mod pattern_spec;
pub use pattern_spec::*;

mod method;
pub use method::*;

mod transport;
pub use transport::*;
