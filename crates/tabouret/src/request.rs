//! The request envelope handed over by the hosting entry point.

use std::collections::HashMap;

use tabouret_router::urn;

/// What the front controller needs to know about an incoming request.
///
/// The method, headers and body are deliberately absent: routing looks at
/// the path only.
#[derive(Debug, Clone)]
pub struct Request {
    /// Raw request URI, possibly with a query string and percent escapes.
    pub uri: String,
    /// Path of the front script, e.g. `/index.php` or `/app/index.php`.
    pub script_name: String,
    /// Value of the `Host` header.
    pub host: Option<String>,
    /// Whether the request arrived over TLS.
    pub https: bool,
}

impl Request {
    /// Creates a request for the application mounted at the server root.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            script_name: "/index.php".to_string(),
            host: None,
            https: false,
        }
    }

    /// Sets the front script path.
    #[must_use]
    pub fn script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Marks the request as HTTPS.
    #[must_use]
    pub fn https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Returns the path the application is mounted under.
    pub fn mount_path(&self) -> &str {
        urn::mount_path(&self.script_name)
    }

    /// Returns the normalized path used for route matching.
    pub fn urn(&self) -> String {
        urn::urn(self.mount_path(), &self.uri)
    }

    /// Parses the query string.
    pub fn query(&self) -> HashMap<String, String> {
        self.uri
            .split_once('?')
            .map(|(_, query)| parse_query_string(query))
            .unwrap_or_default()
    }
}

/// Parses `a=1&b=two+words` into a map. Later keys win.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
