//! Template tokenizing and regex compilation.
//!
//! # Responsibilities
//! - Split a template into literal text and `{name}` placeholders
//! - Build the anchored path pattern used for matching
//! - Build the anchored constraint pattern used for rendering
//! - Cache compiled regexes keyed by their source text
//!
//! # Design Decisions
//! - Single-pass tokenizer: overlapping placeholder names cannot collide
//! - Capture groups are named by declaration index, so any parameter name
//!   (`user-id`, `file.ext`) can be captured
//! - Literal text (and undeclared placeholders) is escaped and matched as-is
//! - Case-insensitive, `.` matches newline, ungreedy quantifiers
//! - The cache key is the full pattern source, so a changed template or
//!   constraint can never hit a stale entry

use std::sync::Arc;

use dashmap::DashMap;
use regex::{Regex, RegexBuilder};

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::params::Params;

/// A piece of a route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Tokenize a template. `{name}` is a placeholder for any non-empty `name`
/// without braces; every other brace is literal text.
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find('{') {
        let open = cursor + offset;
        let Some(len) = template[open + 1..].find('}') else {
            break;
        };
        let name = &template[open + 1..open + 1 + len];

        if !name.is_empty() && !name.contains('{') {
            if open > literal_start {
                tokens.push(Token::Literal(&template[literal_start..open]));
            }
            tokens.push(Token::Placeholder(name));
            cursor = open + len + 2;
            literal_start = cursor;
        } else {
            cursor = open + 1;
        }
    }

    if literal_start < template.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    tokens
}

/// Placeholder names in template order (repeats included).
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    tokenize(template).into_iter().filter_map(|t| match t {
        Token::Placeholder(name) => Some(name),
        Token::Literal(_) => None,
    })
}

/// Capture group name for the declared parameter at `index`.
pub fn group_name(index: usize) -> String {
    format!("p{}", index)
}

/// Anchored path pattern: declared placeholders become capture groups named
/// by [`group_name`] of their declaration index.
///
/// A name repeated in the template is captured once; later occurrences
/// must repeat the same constraint but are not captured again.
pub fn path_pattern(template: &str, declared: &Params) -> String {
    let mut pattern = String::with_capacity(template.len() * 2 + 2);
    let mut captured: Vec<usize> = Vec::new();
    pattern.push('^');

    for token in tokenize(template) {
        match token {
            Token::Literal(text) => pattern.push_str(&regex::escape(text)),
            Token::Placeholder(name) => match declared.find(name) {
                Some((index, constraint)) if !captured.contains(&index) => {
                    captured.push(index);
                    pattern.push_str(&format!("(?P<{}>{})", group_name(index), constraint));
                }
                Some((_, constraint)) => pattern.push_str(&format!("(?:{})", constraint)),
                None => pattern.push_str(&regex::escape(&format!("{{{}}}", name))),
            },
        }
    }

    pattern.push('$');
    pattern
}

/// Anchored pattern that a rendered parameter value must fully match.
pub fn constraint_pattern(constraint: &str) -> String {
    format!("^(?:{})$", constraint)
}

/// Substitute every declared placeholder in `template` with its value.
/// Undeclared placeholders are left as written.
pub fn substitute<'a, F>(template: &str, mut value_of: F) -> String
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    for token in tokenize(template) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder(name) => match value_of(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
    }
    out
}

/// Compile `source` with the router's matching flags.
pub fn compile(source: &str) -> RouteResult<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .swap_greed(true)
        .build()
        .map_err(|source_err| RouteError::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })
}

/// Concurrent cache of compiled patterns, keyed by pattern source.
#[derive(Debug)]
pub struct PatternCache {
    enabled: bool,
    compiled: DashMap<String, Arc<Regex>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self {
            enabled: true,
            compiled: DashMap::new(),
        }
    }

    /// A cache that compiles on every call and stores nothing.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            compiled: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.compiled.clear();
        }
    }

    /// Fetch the compiled regex for `source`, compiling on a miss.
    /// Compilation errors are returned and never cached.
    pub fn get_or_compile(&self, source: &str) -> RouteResult<Arc<Regex>> {
        if !self.enabled {
            return compile(source).map(Arc::new);
        }
        if let Some(hit) = self.compiled.get(source) {
            return Ok(Arc::clone(hit.value()));
        }

        let regex = Arc::new(compile(source)?);
        self.compiled
            .entry(source.to_string())
            .or_insert_with(|| Arc::clone(&regex));
        tracing::trace!(pattern = %source, cached = self.compiled.len(), "Pattern compiled");
        Ok(regex)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn clear(&self) {
        self.compiled.clear();
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PatternCache {
    /// Clones start cold; compiled entries are not shared.
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            compiled: DashMap::new(),
        }
    }
}
