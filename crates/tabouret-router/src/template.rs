//! Reverse templates compiled from route patterns.
//!
//! A route pattern is a regular expression, so in general it cannot be
//! inverted. The patterns routes actually use are literal path text with
//! named groups in place of the variable parts, and that subset is
//! compiled once into a [`UrlTemplate`]:
//!
//! - literal characters and escaped punctuation (`\.`, `\-`, `\/`)
//! - a leading `^` and a trailing `$`
//! - named groups `(?P<name>...)` / `(?<name>...)`, replaced as a whole by
//!   the parameter value
//! - plain `(...)` and non-capturing `(?:...)` groups
//! - `?` and `*` after a group or a single character (the part becomes
//!   optional), `+` (rendered once)
//!
//! An optional part is rendered only when at least one parameter inside
//! it is given and none of its required parameters is missing, so
//! optional literals such as a trailing `/?` never appear in output.
//!
//! Alternation, character classes, `.`, class escapes, counted
//! repetition and inline flags outside named groups are rejected.

use crate::params::Params;

/// How a missing required parameter is treated during generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamMode {
    /// A missing required parameter is an error.
    #[default]
    Strict,
    /// A missing required parameter renders as an empty string.
    Lenient,
}

/// A part of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Param { name: String, optional: bool },
    Group { parts: Vec<Part>, optional: bool },
}

/// A route pattern compiled for URL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    parts: Vec<Part>,
}

impl UrlTemplate {
    /// Compiles a pattern, returning the reason when it falls outside the
    /// reversible subset.
    ///
    /// ```
    /// use tabouret_router::{Params, ParamMode, UrlTemplate};
    ///
    /// let template = UrlTemplate::compile(r"^posts/(?P<slug>[-_a-z0-9]+)$").unwrap();
    /// let params = Params::from([("slug", "hello")]);
    /// assert_eq!(template.render(&params, ParamMode::Strict).unwrap(), "posts/hello");
    ///
    /// assert!(UrlTemplate::compile("^(posts|articles)$").is_err());
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, String> {
        let body = pattern.strip_prefix('^').unwrap_or(pattern);
        let body = match body.strip_suffix('$') {
            Some(rest) if !ends_with_escape(rest) => rest,
            _ => body,
        };
        let mut parser = Parser {
            chars: body.chars().collect(),
            pos: 0,
        };
        let parts = parser.sequence(0)?;
        Ok(Self { parts })
    }

    /// Names of all parameters the template references, in pattern order.
    pub fn param_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_names(&self.parts, &mut names);
        names
    }

    /// Renders the template with the given parameters.
    ///
    /// Returns the name of the first missing required parameter as the
    /// error in [`ParamMode::Strict`].
    pub fn render(&self, params: &Params, mode: ParamMode) -> Result<String, String> {
        let mut out = String::new();
        render_parts(&self.parts, params, mode, &mut out)?;
        Ok(out)
    }
}

/// True when the text ends in an unpaired backslash, which would escape
/// whatever follows it.
fn ends_with_escape(text: &str) -> bool {
    text.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn collect_names<'a>(parts: &'a [Part], names: &mut Vec<&'a str>) {
    for part in parts {
        match part {
            Part::Literal(_) => {}
            Part::Param { name, .. } => names.push(name),
            Part::Group { parts, .. } => collect_names(parts, names),
        }
    }
}

fn render_parts(
    parts: &[Part],
    params: &Params,
    mode: ParamMode,
    out: &mut String,
) -> Result<(), String> {
    for part in parts {
        match part {
            Part::Literal(text) => out.push_str(text),
            Part::Param { name, optional } => match params.get(name) {
                Some(value) => out.push_str(value),
                None if *optional || mode == ParamMode::Lenient => {}
                None => return Err(name.clone()),
            },
            Part::Group { parts, optional } => {
                if *optional && !(any_present(parts, params) && required_present(parts, params)) {
                    continue;
                }
                render_parts(parts, params, mode, out)?;
            }
        }
    }
    Ok(())
}

/// True when at least one parameter referenced by the parts is present.
fn any_present(parts: &[Part], params: &Params) -> bool {
    parts.iter().any(|part| match part {
        Part::Literal(_) => false,
        Part::Param { name, .. } => params.contains(name),
        Part::Group { parts, .. } => any_present(parts, params),
    })
}

/// True when every parameter the parts cannot do without is present.
fn required_present(parts: &[Part], params: &Params) -> bool {
    parts.iter().all(|part| match part {
        Part::Literal(_) => true,
        Part::Param { name, optional } => *optional || params.contains(name),
        Part::Group { parts, optional } => *optional || required_present(parts, params),
    })
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Parses parts until the end of input (depth 0) or the closing
    /// parenthesis of the enclosing group, which is left unconsumed.
    fn sequence(&mut self, depth: usize) -> Result<Vec<Part>, String> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                ')' if depth == 0 => return Err("unbalanced ')'".to_string()),
                ')' => return Ok(parts),
                '(' => {
                    self.bump();
                    let part = self.group(depth)?;
                    parts.push(part);
                }
                '\\' => {
                    self.bump();
                    let escaped = self.bump().ok_or("trailing backslash")?;
                    if !escaped.is_ascii_punctuation() {
                        return Err(format!("escape '\\{escaped}' is not reversible"));
                    }
                    self.literal(escaped, &mut parts)?;
                }
                '|' => return Err("alternation is not reversible".to_string()),
                '[' => return Err("character classes are not reversible".to_string()),
                '.' => return Err("'.' is not reversible".to_string()),
                '^' | '$' => return Err(format!("anchor '{c}' inside the pattern")),
                '?' | '*' | '+' | '{' => return Err(format!("dangling quantifier '{c}'")),
                _ => {
                    self.bump();
                    self.literal(c, &mut parts)?;
                }
            }
        }
        if depth > 0 {
            return Err("unclosed '('".to_string());
        }
        Ok(parts)
    }

    fn literal(&mut self, c: char, parts: &mut Vec<Part>) -> Result<(), String> {
        if self.optional_suffix()? {
            parts.push(Part::Group {
                parts: vec![Part::Literal(c.to_string())],
                optional: true,
            });
        } else if let Some(Part::Literal(text)) = parts.last_mut() {
            text.push(c);
        } else {
            parts.push(Part::Literal(c.to_string()));
        }
        Ok(())
    }

    /// Parses a group whose opening parenthesis was just consumed.
    fn group(&mut self, depth: usize) -> Result<Part, String> {
        if self.peek() == Some('?') {
            match (self.peek_at(1), self.peek_at(2)) {
                (Some('P'), Some('<')) => {
                    self.pos += 3;
                    return self.named_group();
                }
                (Some('<'), Some(c)) if c != '=' && c != '!' => {
                    self.pos += 2;
                    return self.named_group();
                }
                (Some(':'), _) => self.pos += 2,
                _ => return Err("inline flags are not reversible".to_string()),
            }
        }
        let parts = self.sequence(depth + 1)?;
        self.bump();
        let optional = self.optional_suffix()?;
        Ok(Part::Group { parts, optional })
    }

    fn named_group(&mut self) -> Result<Part, String> {
        let mut name = String::new();
        loop {
            match self.bump() {
                Some('>') => break,
                Some(c) => name.push(c),
                None => return Err("unterminated group name".to_string()),
            }
        }
        self.skip_group_body()?;
        let optional = self.optional_suffix()?;
        Ok(Part::Param { name, optional })
    }

    /// Skips to just past the parenthesis closing the current group.
    fn skip_group_body(&mut self) -> Result<(), String> {
        let mut depth = 1usize;
        let mut in_class = false;
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '[' if !in_class => {
                    in_class = true;
                    // A ']' right after '[' or '[^' is a literal member.
                    if self.peek() == Some('^') {
                        self.bump();
                    }
                    if self.peek() == Some(']') {
                        self.bump();
                    }
                }
                ']' if in_class => in_class = false,
                '(' if !in_class => depth += 1,
                ')' if !in_class => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err("unclosed '('".to_string())
    }

    /// Consumes a quantifier, returning whether it makes the preceding
    /// part optional.
    fn optional_suffix(&mut self) -> Result<bool, String> {
        let optional = match self.peek() {
            Some('?' | '*') => true,
            Some('+') => false,
            Some('{') => return Err("counted repetition is not reversible".to_string()),
            _ => return Ok(false),
        };
        self.bump();
        // Lazy modifier.
        if self.peek() == Some('?') {
            self.bump();
        }
        Ok(optional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(pattern: &str, params: &Params) -> Result<String, String> {
        UrlTemplate::compile(pattern)
            .unwrap()
            .render(params, ParamMode::Strict)
    }

    #[test]
    fn test_literal_pattern() {
        assert_eq!(render("^posts$", &Params::new()), Ok("posts".to_string()));
        assert_eq!(render("^$", &Params::new()), Ok(String::new()));
    }

    #[test]
    fn test_named_group() {
        let params = Params::from([("slug", "something")]);
        assert_eq!(
            render("^posts/(?P<slug>[-_a-z0-9]+)$", &params),
            Ok("posts/something".to_string())
        );
        assert_eq!(
            render("^posts/(?<slug>[^/)]+)$", &params),
            Ok("posts/something".to_string())
        );
    }

    #[test]
    fn test_missing_parameter() {
        assert_eq!(
            render("^posts/(?P<slug>[a-z]+)$", &Params::new()),
            Err("slug".to_string())
        );
    }

    #[test]
    fn test_lenient_mode() {
        let template = UrlTemplate::compile("^posts/(?P<slug>[a-z]+)$").unwrap();
        assert_eq!(
            template.render(&Params::new(), ParamMode::Lenient),
            Ok("posts/".to_string())
        );
    }

    #[test]
    fn test_optional_group() {
        let pattern = r"^posts(/page/(?P<page>\d+))?$";
        assert_eq!(render(pattern, &Params::new()), Ok("posts".to_string()));
        assert_eq!(
            render(pattern, &Params::from([("page", "3")])),
            Ok("posts/page/3".to_string())
        );
    }

    #[test]
    fn test_optional_nested_group() {
        let pattern = r"^archive/(?P<year>\d{4})(/(?P<month>\d{2})(/(?P<day>\d{2}))?)?/?$";
        assert_eq!(
            render(pattern, &Params::from([("year", "2012")])),
            Ok("archive/2012".to_string())
        );
        assert_eq!(
            render(pattern, &Params::from([("year", "2012"), ("month", "05")])),
            Ok("archive/2012/05".to_string())
        );
        assert_eq!(
            render(pattern, &Params::from([("year", "2012"), ("month", "05"), ("day", "01")])),
            Ok("archive/2012/05/01".to_string())
        );
        // The day alone cannot be placed without its month.
        assert_eq!(
            render(pattern, &Params::from([("year", "2012"), ("day", "01")])),
            Ok("archive/2012".to_string())
        );
    }

    #[test]
    fn test_optional_literal_is_omitted() {
        assert_eq!(render("^posts/?$", &Params::new()), Ok("posts".to_string()));
        assert_eq!(render("^posts/+$", &Params::new()), Ok("posts/".to_string()));
    }

    #[test]
    fn test_optional_named_param() {
        let pattern = "^search/(?P<q>[^/]+)?$";
        assert_eq!(render(pattern, &Params::new()), Ok("search/".to_string()));
        assert_eq!(
            render(pattern, &Params::from([("q", "rust")])),
            Ok("search/rust".to_string())
        );
    }

    #[test]
    fn test_non_capturing_group_and_escapes() {
        assert_eq!(
            render(r"^feed(?:\.xml)$", &Params::new()),
            Ok("feed.xml".to_string())
        );
        assert_eq!(
            render(r"^files/(?P<name>[^/]+)\.txt$", &Params::from([("name", "a")])),
            Ok("files/a.txt".to_string())
        );
    }

    #[test]
    fn test_trailing_anchor_after_backslashes() {
        assert_eq!(render(r"^dir\\$", &Params::new()), Ok("dir\\".to_string()));
        assert_eq!(render(r"^price\$", &Params::new()), Ok("price$".to_string()));
        assert_eq!(render(r"^a\\\$$", &Params::new()), Ok("a\\$".to_string()));
    }

    #[test]
    fn test_nested_groups_inside_named_group() {
        let pattern = r"^tags/(?P<tag>(?:[a-z]+)(?:-[a-z]+)*)$";
        assert_eq!(
            render(pattern, &Params::from([("tag", "rust-lang")])),
            Ok("tags/rust-lang".to_string())
        );
    }

    #[test]
    fn test_param_names() {
        let template =
            UrlTemplate::compile(r"^(?P<year>\d+)/(?P<slug>[a-z]+)(/(?P<page>\d+))?$").unwrap();
        assert_eq!(template.param_names(), vec!["year", "slug", "page"]);
    }

    #[test]
    fn test_unsupported_patterns() {
        for pattern in [
            "^(posts|articles)$",
            "^posts/[a-z]+$",
            r"^posts/\d+$",
            "^posts/.*$",
            "^(?i)posts$",
            "^a{2}$",
            "^(posts$",
            "^posts)$",
            "^posts/(?P<slug",
        ] {
            assert!(UrlTemplate::compile(pattern).is_err(), "accepted {pattern:?}");
        }
    }

    #[test]
    fn test_unicode_literals() {
        assert_eq!(render("^статьи$", &Params::new()), Ok("статьи".to_string()));
    }
}
