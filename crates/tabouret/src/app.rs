//! The front controller.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tabouret_router::{Params, RouteMatch, RouteTable, Target, UrlGenerator};
use tracing::{debug, error, warn};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::request::Request;
use crate::response::Response;

/// A request handler bound to a `module.controller.action` target.
pub type Handler = Arc<dyn Fn(&Context<'_>) -> Result<Response> + Send + Sync>;

/// What a handler sees of the current request.
pub struct Context<'a> {
    app: &'a App,
    request: &'a Request,
    route: Option<RouteMatch>,
    message: Option<String>,
}

impl<'a> Context<'a> {
    /// Returns the request.
    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// Returns the matched route. `None` inside the 404 handler.
    pub fn route(&self) -> Option<&RouteMatch> {
        self.route.as_ref()
    }

    /// Returns the route parameters.
    pub fn params(&self) -> Params {
        self.route
            .as_ref()
            .map(|m| m.params.clone())
            .unwrap_or_default()
    }

    /// Looks a parameter up in the route captures, then in the query
    /// string. Route captures shadow query parameters of the same name.
    pub fn param(&self, key: &str) -> Option<String> {
        self.route
            .as_ref()
            .and_then(|m| m.params.get(key))
            .map(str::to_string)
            .or_else(|| self.request.query().remove(key))
    }

    /// Returns the reason a 404 page is being rendered.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the application config.
    pub fn config(&self) -> &'a AppConfig {
        self.app.config()
    }

    /// Generates a path for a named route.
    pub fn url(&self, name: &str, params: &Params) -> Result<String> {
        Ok(self.app.urls(self.request).url(name, params)?)
    }

    /// Generates an absolute URL for a named route, with the scheme of the
    /// current request.
    pub fn absolute_url(&self, name: &str, params: &Params) -> Result<String> {
        Ok(self
            .app
            .urls(self.request)
            .absolute_url(name, params, self.request.https)?)
    }
}

/// A front controller: the route table plus the handlers its targets
/// dispatch to.
///
/// ```
/// use tabouret::{App, AppConfig, Request, Response};
///
/// # fn main() -> tabouret::Result<()> {
/// let config = AppConfig::default()
///     .route("home", "^$", "main.site.index")
///     .route("post", "^posts/(?P<slug>[-_a-z0-9]+)$", "blog.posts.show");
///
/// let mut app = App::new(config)?;
/// app.handler("blog.posts.show", |ctx| {
///     let slug = ctx.param("slug").unwrap_or_default();
///     Ok(Response::text(format!("post {slug}")))
/// })?;
///
/// let res = app.handle(&Request::new("/posts/hello"));
/// assert_eq!(res.body_string().as_deref(), Some("post hello"));
/// assert_eq!(app.handle(&Request::new("/nope")).status, 404);
/// # Ok(())
/// # }
/// ```
pub struct App {
    config: AppConfig,
    routes: RouteTable,
    handlers: HashMap<Target, Handler>,
}

impl App {
    /// Creates an application, building its route table from the config.
    pub fn new(config: AppConfig) -> Result<Self> {
        let routes = config.route_table()?;
        Ok(Self {
            config,
            routes,
            handlers: HashMap::new(),
        })
    }

    /// Creates an application from a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(AppConfig::load(path)?)
    }

    /// Registers the handler for a dotted target, replacing any previous one.
    pub fn handler<F>(&mut self, target: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&Context<'_>) -> Result<Response> + Send + Sync + 'static,
    {
        let target =
            Target::parse(target).ok_or_else(|| AppError::InvalidTarget(target.to_string()))?;
        debug!(handler = %target, "registered handler");
        self.handlers.insert(target, Arc::new(handler));
        Ok(self)
    }

    /// Returns the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns a URL generator for the mount path and host of a request.
    pub fn urls<'a>(&'a self, request: &Request) -> UrlGenerator<'a> {
        let urls = UrlGenerator::new(&self.routes, request.mount_path())
            .with_mode(self.config.param_mode());
        match &request.host {
            Some(host) => urls.with_host(host.as_str()),
            None => urls,
        }
    }

    /// Generates a URL for a named route in the context of a request.
    pub fn url(
        &self,
        request: &Request,
        name: &str,
        params: &Params,
        absolute: bool,
        https: bool,
    ) -> Result<String> {
        Ok(self.urls(request).generate(name, params, absolute, https)?)
    }

    /// Dispatches a request to the handler of the first matching route.
    ///
    /// Never fails: unmatched paths and targets without a handler produce
    /// a 404, handler errors a 500.
    pub fn handle(&self, request: &Request) -> Response {
        let urn = request.urn();
        let matched = match self.routes.resolve(&urn) {
            Ok(matched) => matched,
            Err(err) => return self.not_found(request, err.to_string()),
        };

        let Some(handler) = self.handlers.get(&matched.target) else {
            warn!(route = %matched.name, handler = %matched.target, "no handler registered for target");
            return self.not_found(request, format!("no handler for {}", matched.target));
        };

        let dispatched = matched.target.clone();
        let ctx = Context {
            app: self,
            request,
            route: Some(matched),
            message: None,
        };
        match handler(&ctx) {
            Ok(response) => response,
            Err(err) => {
                error!(handler = %dispatched, error = %err, "handler failed");
                Response::internal_server_error()
            }
        }
    }

    fn not_found(&self, request: &Request, message: String) -> Response {
        debug!(uri = %request.uri, %message, "not found");
        let handler = self
            .config
            .error404_action
            .as_deref()
            .and_then(Target::parse)
            .and_then(|target| self.handlers.get(&target));
        let Some(handler) = handler else {
            return Response::not_found();
        };

        let ctx = Context {
            app: self,
            request,
            route: None,
            message: Some(message),
        };
        match handler(&ctx) {
            Ok(response) => response.status(404),
            Err(err) => {
                error!(error = %err, "404 handler failed");
                Response::not_found()
            }
        }
    }
}
