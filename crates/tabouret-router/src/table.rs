//! The ordered route table and request matching.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, RouterError};
use crate::params::Params;
use crate::rule::{Rule, Target};
use crate::template::UrlTemplate;

/// A registered route: a rule compiled for matching and for generation.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    rule: Rule,
    regex: Regex,
    target: Target,
    template: std::result::Result<UrlTemplate, String>,
}

impl Route {
    /// Compiles a rule.
    ///
    /// Fails if the target is not a `module.controller.action` triple or the
    /// pattern is not a valid regular expression. A pattern that cannot be
    /// reversed is accepted; only URL generation for it will fail.
    pub fn new(name: impl Into<String>, rule: Rule) -> Result<Self> {
        let name = name.into();
        let target = Target::parse(&rule.target).ok_or_else(|| RouterError::MalformedTarget {
            route: name.clone(),
            target: rule.target.clone(),
        })?;
        let regex = Regex::new(&rule.pattern).map_err(|source| RouterError::InvalidPattern {
            route: name.clone(),
            source,
        })?;
        let template = UrlTemplate::compile(&rule.pattern);
        if let Err(reason) = &template {
            warn!(route = %name, pattern = %rule.pattern, %reason, "route pattern is not reversible");
        }
        Ok(Self {
            name,
            rule,
            regex,
            target,
            template,
        })
    }

    /// Returns the route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rule this route was built from.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Returns the pattern source.
    pub fn pattern(&self) -> &str {
        &self.rule.pattern
    }

    /// Returns the parsed target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Returns the reverse template, or why the pattern has none.
    pub fn template(&self) -> std::result::Result<&UrlTemplate, &str> {
        self.template.as_ref().map_err(String::as_str)
    }

    /// Matches a URN against this route's pattern.
    ///
    /// Returns the named captures that took part in the match. Unnamed
    /// groups are ignored.
    pub fn captures(&self, urn: &str) -> Option<Params> {
        let caps = self.regex.captures(urn)?;
        let params = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| caps.name(name).map(|m| (name, m.as_str())))
            .collect();
        Some(params)
    }
}

/// A successful match of a URN against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Name of the matched route.
    pub name: String,
    /// Target the route dispatches to.
    pub target: Target,
    /// Named captures.
    pub params: Params,
}

impl RouteMatch {
    pub fn module(&self) -> &str {
        &self.target.module
    }

    pub fn controller(&self) -> &str {
        &self.target.controller
    }

    pub fn action(&self) -> &str {
        &self.target.action
    }
}

/// Named routes in match-priority order.
///
/// Routes are tried in the order their names were first added. Adding a
/// name that already exists replaces its rule but keeps its position.
///
/// The table is built with `&mut` methods and then shared by reference;
/// matching and generation only need `&self`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    positions: HashMap<String, usize>,
}

impl RouteTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(name, pattern, target)` triples.
    pub fn from_triples<I, N, P, T>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, P, T)>,
        N: Into<String>,
        P: Into<String>,
        T: Into<String>,
    {
        let mut table = Self::new();
        table.add_routes(
            triples
                .into_iter()
                .map(|(name, pattern, target)| (name, Rule::new(pattern, target))),
        )?;
        Ok(table)
    }

    /// Adds a route, or replaces the rule of an existing one in place.
    pub fn add_route(&mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Result<&mut Self> {
        let route = Route::new(name, rule.into())?;
        if let Some(&at) = self.positions.get(route.name()) {
            debug!(route = %route.name(), pattern = %route.pattern(), "replaced route");
            self.routes[at] = route;
        } else {
            debug!(route = %route.name(), pattern = %route.pattern(), "registered route");
            self.positions.insert(route.name.clone(), self.routes.len());
            self.routes.push(route);
        }
        Ok(self)
    }

    /// Adds routes in order, stopping at the first invalid one.
    pub fn add_routes<I, N, R>(&mut self, rules: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (N, R)>,
        N: Into<String>,
        R: Into<Rule>,
    {
        for (name, rule) in rules {
            self.add_route(name, rule)?;
        }
        Ok(self)
    }

    /// Gets a route by name.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.positions.get(name).map(|&at| &self.routes[at])
    }

    /// Returns true if a route with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Iterates routes in match order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the first route matching the URN.
    ///
    /// Earlier routes win even when a later one is more specific.
    pub fn match_urn(&self, urn: &str) -> Option<RouteMatch> {
        let found = self.routes.iter().find_map(|route| {
            route.captures(urn).map(|params| RouteMatch {
                name: route.name.clone(),
                target: route.target.clone(),
                params,
            })
        });
        match &found {
            Some(m) => debug!(urn, route = %m.name, target = %m.target, "matched route"),
            None => debug!(urn, "no route matched"),
        }
        found
    }

    /// Like [`match_urn`](Self::match_urn), with a miss reported as
    /// [`RouterError::NoMatch`].
    pub fn resolve(&self, urn: &str) -> Result<RouteMatch> {
        self.match_urn(urn).ok_or_else(|| RouterError::NoMatch {
            urn: urn.to_string(),
        })
    }

    /// Returns true if any route matches the URN.
    pub fn is_match(&self, urn: &str) -> bool {
        self.routes.iter().any(|route| route.regex.is_match(urn))
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
