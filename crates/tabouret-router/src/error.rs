//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route matched the request path.
    #[error("no route matched: {urn:?}")]
    NoMatch { urn: String },

    /// A rule's target is not of the form `module.controller.action`.
    #[error("route '{route}' has malformed target '{target}' (expected module.controller.action)")]
    MalformedTarget { route: String, target: String },

    /// A rule's pattern is not a valid regular expression.
    #[error("route '{route}' has invalid pattern: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: regex::Error,
    },

    /// Route name not found.
    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// A required named group has no value.
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParameter { route: String, param: String },

    /// The route's pattern cannot be turned back into a URL.
    #[error("route '{route}' cannot be reversed: {reason}")]
    NotReversible { route: String, reason: String },

    /// An absolute URL was requested without a host.
    #[error("route '{route}': absolute URL requested but no host is known")]
    MissingHost { route: String },

    /// [`Params::require`](crate::Params::require) asked for a parameter the
    /// map does not hold. Generation reports [`RouterError::MissingParameter`].
    #[error("parameter not found: {0}")]
    ParamNotFound(String),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
