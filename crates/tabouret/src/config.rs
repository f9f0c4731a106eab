//! Application configuration.
//!
//! The config is a JSON document:
//!
//! ```json
//! {
//!     "error404_action": "main.site.error404",
//!     "routes": [
//!         ["home", "^$", "main.site.index"],
//!         ["post", "^posts/(?P<slug>[-_a-z0-9а-я]+)$", "blog.posts.show"]
//!     ],
//!     "site": { "title": "My blog" }
//! }
//! ```
//!
//! Routes are an ordered list of `[name, pattern, target]` triples; their
//! order is the match order. Unknown top-level keys are kept and can be
//! read with [`AppConfig::get`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabouret_router::{ParamMode, RouteTable};
use tracing::info;

use crate::error::{AppError, Result};

/// One `[name, pattern, target]` entry of the route list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry(pub String, pub String, pub String);

impl RouteEntry {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self(name.into(), pattern.into(), target.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn pattern(&self) -> &str {
        &self.1
    }

    pub fn target(&self) -> &str {
        &self.2
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Target whose handler renders 404 pages.
    #[serde(default)]
    pub error404_action: Option<String>,

    /// Render missing required URL parameters as empty instead of failing.
    #[serde(default)]
    pub lenient_urls: bool,

    /// Routes in match order.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,

    /// Any other settings.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}


impl AppConfig {
    /// Loads the config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::ConfigNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), routes = config.routes.len(), "loaded config");
        Ok(config)
    }

    /// Parses the config from a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Adds a route at the end of the route list.
    #[must_use]
    pub fn route(mut self, name: &str, pattern: &str, target: &str) -> Self {
        self.routes.push(RouteEntry::new(name, pattern, target));
        self
    }

    /// Builds the route table. Invalid rules fail here, at startup.
    pub fn route_table(&self) -> Result<RouteTable> {
        let table = RouteTable::from_triples(
            self.routes
                .iter()
                .map(|r| (r.name(), r.pattern(), r.target())),
        )?;
        Ok(table)
    }

    /// How URL generation treats missing required parameters.
    pub fn param_mode(&self) -> ParamMode {
        if self.lenient_urls {
            ParamMode::Lenient
        } else {
            ParamMode::Strict
        }
    }

    /// Looks up an extra setting by top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
