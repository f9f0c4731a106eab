//! # tabouret
//!
//! A minimal front controller on top of [`tabouret_router`].
//!
//! This crate provides:
//! - JSON application config with an ordered route list
//! - A request envelope carrying what routing needs (URI, script name,
//!   host, scheme)
//! - Dispatch of matched routes to handlers registered per
//!   `module.controller.action` target
//! - 404 handling through an optional configured error action
//! - URL generation from inside handlers
//!
//! ## Quick Start
//!
//! ```
//! use tabouret::{App, AppConfig, Params, Request, Response};
//!
//! # fn main() -> tabouret::Result<()> {
//! let config = AppConfig::from_json(r#"{
//!     "error404_action": "main.site.error404",
//!     "routes": [
//!         ["home", "^$", "main.site.index"],
//!         ["post", "^posts/(?P<slug>[-_a-z0-9]+)$", "blog.posts.show"]
//!     ]
//! }"#)?;
//!
//! let mut app = App::new(config)?;
//! app.handler("main.site.index", |ctx| {
//!     let link = ctx.url("post", &Params::from([("slug", "hello")]))?;
//!     Ok(Response::html(format!("<a href=\"{link}\">hello</a>")))
//! })?
//! .handler("main.site.error404", |_| Ok(Response::html("<h1>Nothing here</h1>")))?;
//!
//! let res = app.handle(&Request::new("/"));
//! assert_eq!(res.body_string().as_deref(), Some("<a href=\"/posts/hello\">hello</a>"));
//!
//! let res = app.handle(&Request::new("/missing"));
//! assert_eq!(res.status, 404);
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;
mod request;
mod response;

pub use app::{App, Context, Handler};
pub use config::{AppConfig, RouteEntry};
pub use error::{AppError, Result};
pub use request::{parse_query_string, Request};
pub use response::Response;
pub use tabouret_router::{Params, RouteMatch, RouteTable, Target};
