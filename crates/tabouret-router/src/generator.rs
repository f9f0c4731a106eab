//! URL generation for named routes.

use tracing::debug;

use crate::error::{Result, RouterError};
use crate::params::Params;
use crate::table::RouteTable;
use crate::template::ParamMode;

/// Builds URLs for the routes of a table, relative to a mount path.
///
/// ```
/// use tabouret_router::{Params, RouteTable, UrlGenerator};
///
/// # fn main() -> tabouret_router::Result<()> {
/// let routes = RouteTable::from_triples([
///     ("home", "^$", "main.site.index"),
///     ("post", "^posts/(?P<slug>[-_a-z0-9]+)$", "blog.posts.show"),
/// ])?;
/// let urls = UrlGenerator::new(&routes, "/").with_host("localhost");
///
/// assert_eq!(urls.url("home", &Params::new())?, "/");
/// let params = Params::from([("slug", "something")]);
/// assert_eq!(urls.url("post", &params)?, "/posts/something");
/// assert_eq!(
///     urls.absolute_url("post", &params, true)?,
///     "https://localhost/posts/something"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UrlGenerator<'a> {
    routes: &'a RouteTable,
    mount_path: String,
    host: Option<String>,
    mode: ParamMode,
}

impl<'a> UrlGenerator<'a> {
    /// Creates a generator for URLs under `mount_path`.
    pub fn new(routes: &'a RouteTable, mount_path: &str) -> Self {
        let mut mount = String::with_capacity(mount_path.len() + 2);
        if !mount_path.starts_with('/') {
            mount.push('/');
        }
        mount.push_str(mount_path);
        if !mount.ends_with('/') {
            mount.push('/');
        }
        Self {
            routes,
            mount_path: mount,
            host: None,
            mode: ParamMode::default(),
        }
    }

    /// Sets the host used for absolute URLs.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets how missing required parameters are handled.
    #[must_use]
    pub fn with_mode(mut self, mode: ParamMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the normalized mount path, always with leading and
    /// trailing slashes.
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    /// Generates a URL for a named route.
    pub fn generate(
        &self,
        name: &str,
        params: &Params,
        absolute: bool,
        https: bool,
    ) -> Result<String> {
        let route = self
            .routes
            .get(name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;
        let template = route
            .template()
            .map_err(|reason| RouterError::NotReversible {
                route: name.to_string(),
                reason: reason.to_string(),
            })?;
        let path = template
            .render(params, self.mode)
            .map_err(|param| RouterError::MissingParameter {
                route: name.to_string(),
                param,
            })?;
        let relative = format!("{}{}", self.mount_path, tidy(&path));

        let url = if absolute {
            let host = self.host.as_deref().ok_or_else(|| RouterError::MissingHost {
                route: name.to_string(),
            })?;
            let scheme = if https { "https" } else { "http" };
            format!("{scheme}://{host}{relative}")
        } else {
            relative
        };
        debug!(route = name, %url, "generated url");
        Ok(url)
    }

    /// Generates a path relative to the server root.
    pub fn url(&self, name: &str, params: &Params) -> Result<String> {
        self.generate(name, params, false, false)
    }

    /// Generates a URL with scheme and host.
    pub fn absolute_url(&self, name: &str, params: &Params, https: bool) -> Result<String> {
        self.generate(name, params, true, https)
    }
}

/// Collapses repeated slashes in a rendered path, drops leading slashes
/// (the mount path already ends in one) and trims one trailing slash.
fn tidy(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && (out.is_empty() || out.ends_with('/')) {
            continue;
        }
        out.push(c);
    }
    if out.ends_with('/') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteTable {
        RouteTable::from_triples([
            ("home", "^$", "main.site.index"),
            ("post", "^posts/(?P<slug>[-_a-z0-9]+)$", "blog.posts.show"),
            ("page", r"^posts(/page/(?P<page>\d+))?/?$", "blog.posts.index"),
            ("alt", "^(posts|articles)$", "blog.posts.index"),
        ])
        .unwrap()
    }

    #[test]
    fn test_tidy() {
        assert_eq!(tidy("/"), "");
        assert_eq!(tidy(""), "");
        assert_eq!(tidy("//posts///x/"), "posts/x");
        assert_eq!(tidy("posts/"), "posts");
    }

    #[test]
    fn test_relative_urls() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/");
        assert_eq!(urls.url("home", &Params::new()).unwrap(), "/");
        assert_eq!(
            urls.url("post", &Params::from([("slug", "something")])).unwrap(),
            "/posts/something"
        );
        assert_eq!(urls.url("page", &Params::new()).unwrap(), "/posts");
        assert_eq!(
            urls.url("page", &Params::from([("page", "2")])).unwrap(),
            "/posts/page/2"
        );
    }

    #[test]
    fn test_mount_path_prefix() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/app/");
        assert_eq!(urls.url("home", &Params::new()).unwrap(), "/app/");
        assert_eq!(
            urls.url("post", &Params::from([("slug", "x")])).unwrap(),
            "/app/posts/x"
        );
        assert_eq!(UrlGenerator::new(&routes, "app").mount_path(), "/app/");
        assert_eq!(UrlGenerator::new(&routes, "").mount_path(), "/");
    }

    #[test]
    fn test_absolute_urls() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/").with_host("localhost");
        let params = Params::from([("slug", "something")]);
        assert_eq!(
            urls.absolute_url("post", &params, true).unwrap(),
            "https://localhost/posts/something"
        );
        assert_eq!(
            urls.absolute_url("post", &params, false).unwrap(),
            "http://localhost/posts/something"
        );
        assert_eq!(
            urls.absolute_url("home", &Params::new(), false).unwrap(),
            "http://localhost/"
        );
    }

    #[test]
    fn test_absolute_without_host() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/");
        assert!(matches!(
            urls.absolute_url("home", &Params::new(), true),
            Err(RouterError::MissingHost { route }) if route == "home"
        ));
    }

    #[test]
    fn test_route_not_found() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/");
        assert!(matches!(
            urls.url("nope", &Params::new()),
            Err(RouterError::RouteNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_missing_parameter_strict() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/");
        assert!(matches!(
            urls.url("post", &Params::new()),
            Err(RouterError::MissingParameter { route, param }) if route == "post" && param == "slug"
        ));
    }

    #[test]
    fn test_missing_parameter_lenient() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/").with_mode(ParamMode::Lenient);
        assert_eq!(urls.url("post", &Params::new()).unwrap(), "/posts");
    }

    #[test]
    fn test_not_reversible() {
        let routes = routes();
        let urls = UrlGenerator::new(&routes, "/");
        assert!(matches!(
            urls.url("alt", &Params::new()),
            Err(RouterError::NotReversible { route, .. }) if route == "alt"
        ));
    }
}
