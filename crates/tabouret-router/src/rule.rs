//! Route rules and handler targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A routing rule: a regular expression and the target it dispatches to.
///
/// The pattern is matched as-is against the normalized request path, so
/// rules are expected to carry their own `^` and `$` anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Regular expression source. Named groups become route parameters.
    pub pattern: String,
    /// Dotted `module.controller.action` target.
    pub target: String,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
        }
    }
}

impl<P: Into<String>, T: Into<String>> From<(P, T)> for Rule {
    fn from((pattern, target): (P, T)) -> Self {
        Self::new(pattern, target)
    }
}

/// The `module.controller.action` triple a route resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Target {
    pub module: String,
    pub controller: String,
    pub action: String,
}

impl Target {
    /// Parses a dotted target.
    ///
    /// Returns `None` unless the string splits on `.` into exactly three
    /// non-empty identifiers.
    ///
    /// ```
    /// use tabouret_router::Target;
    ///
    /// let target = Target::parse("blog.posts.show").unwrap();
    /// assert_eq!(target.module, "blog");
    /// assert_eq!(target.action, "show");
    ///
    /// assert!(Target::parse("blog.posts").is_none());
    /// assert!(Target::parse("blog..show").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('.');
        let module = identifier(parts.next()?)?;
        let controller = identifier(parts.next()?)?;
        let action = identifier(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            module: module.to_string(),
            controller: controller.to_string(),
            action: action.to_string(),
        })
    }
}

fn identifier(s: &str) -> Option<&str> {
    let valid = !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_');
    valid.then_some(s)
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.module, self.controller, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        let target = Target::parse("main.site.index").unwrap();
        assert_eq!(target.module, "main");
        assert_eq!(target.controller, "site");
        assert_eq!(target.action, "index");
        assert_eq!(target.to_string(), "main.site.index");
    }

    #[test]
    fn test_parse_malformed_target() {
        for bad in [
            "",
            "main",
            "main.site",
            "main.site.index.extra",
            ".site.index",
            "main.site.",
            "main.si te.index",
        ] {
            assert!(Target::parse(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_rule_from_tuple() {
        let rule: Rule = ("^$", "main.site.index").into();
        assert_eq!(rule.pattern, "^$");
        assert_eq!(rule.target, "main.site.index");
    }
}
