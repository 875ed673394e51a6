//! HTTP method vocabulary and normalization.
//!
//! # Design Decisions
//! - Methods are stored as uppercase tokens, compared case-insensitively
//! - An empty set means "every standard method", never "nothing"
//! - Sentinel tokens expand in place; duplicates are kept since lookups
//!   are membership tests

use std::fmt;

/// Every method a route accepts when none (or a sentinel) is given.
pub const STANDARD_METHODS: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "DELETE", "TRACE", "OPTIONS", "CONNECT", "PATCH",
];

/// Tokens that stand for the full standard list. `HTTP` is the legacy spelling.
pub const ANY_METHOD_SENTINELS: [&str; 2] = ["ANY", "HTTP"];

/// Separator for methods written as a single string, e.g. `GET|POST`.
pub const METHOD_SEPARATOR: char = '|';

/// Normalized, never-empty list of accepted methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSet {
    methods: Vec<String>,
}

impl MethodSet {
    /// Normalize a list of method tokens.
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut methods: Vec<String> = methods
            .into_iter()
            .map(|m| m.as_ref().trim().to_uppercase())
            .filter(|m| !m.is_empty())
            .collect();

        if methods.is_empty() {
            return Self::any();
        }

        if let Some(pos) = methods
            .iter()
            .position(|m| ANY_METHOD_SENTINELS.contains(&m.as_str()))
        {
            methods.splice(pos..=pos, STANDARD_METHODS.iter().map(|m| m.to_string()));
        }

        Self { methods }
    }

    /// Parse a `|`-delimited method string such as `"get|post"`.
    pub fn parse(methods: &str) -> Self {
        Self::new(methods.split(METHOD_SEPARATOR))
    }

    /// The full standard method list.
    pub fn any() -> Self {
        Self {
            methods: STANDARD_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for MethodSet {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.methods.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", METHOD_SEPARATOR)?;
            }
            f.write_str(m)?;
        }
        Ok(())
    }
}

/// Whether `method` belongs to the standard vocabulary (sentinels included).
pub fn is_known_method(method: &str) -> bool {
    let upper = method.trim().to_uppercase();
    STANDARD_METHODS.contains(&upper.as_str()) || ANY_METHOD_SENTINELS.contains(&upper.as_str())
}
