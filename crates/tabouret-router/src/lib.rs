//! # tabouret-router
//!
//! The routing engine of the tabouret front controller.
//!
//! This crate provides:
//! - An ordered table of named routes, each a regular expression bound to
//!   a `module.controller.action` target
//! - First-match-wins resolution of request paths, with named capture
//!   groups as route parameters
//! - Request path normalization (mount path, query string, trailing slash)
//! - Reverse URL generation from a route name and parameters
//!
//! ## Quick Start
//!
//! ```
//! use tabouret_router::{urn, Params, RouteTable, UrlGenerator};
//!
//! # fn main() -> tabouret_router::Result<()> {
//! let mut routes = RouteTable::new();
//! routes
//!     .add_route("home", ("^$", "main.site.index"))?
//!     .add_route("post", ("^posts/(?P<slug>[-_a-z0-9а-я]+)$", "blog.posts.show"))?;
//!
//! let path = urn::urn("/", "/posts/hello?ref=feed");
//! let matched = routes.resolve(&path)?;
//! assert_eq!(matched.target.to_string(), "blog.posts.show");
//! assert_eq!(matched.params.get("slug"), Some("hello"));
//!
//! let urls = UrlGenerator::new(&routes, "/");
//! assert_eq!(urls.url("post", &matched.params)?, "/posts/hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Match Order
//!
//! Routes are tried in insertion order and the first match wins, so
//! specific routes must be added before general ones. Re-adding a name
//! replaces its rule without moving it.
//!
//! Patterns are not anchored implicitly. A rule without `^` and `$` can
//! match anywhere in the path.
//!
//! ## Reverse Generation
//!
//! Only patterns built from literal text, named groups and plain or
//! optional groups can be turned back into URLs; see [`UrlTemplate`].
//! Missing required parameters are an error unless the generator runs in
//! [`ParamMode::Lenient`].

mod error;
mod generator;
mod params;
mod rule;
mod table;
mod template;
pub mod urn;

pub use error::{Result, RouterError};
pub use generator::UrlGenerator;
pub use params::Params;
pub use rule::{Rule, Target};
pub use table::{Route, RouteMatch, RouteTable};
pub use template::{ParamMode, UrlTemplate};
