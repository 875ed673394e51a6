//! Structured URI value used for route templates and request targets.
//!
//! # Design Decisions
//! - No percent-encoding or decoding: bytes pass through untouched
//! - Braces are ordinary characters so templates parse like any URI
//! - Plain owned value; cloning is always a deep copy

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from [`Uri::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("missing host after scheme {0:?}")]
    MissingHost(String),
}

/// A URI split into the components routing cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Uri {
    /// Parse absolute (`http://host:8080/a?b#c`), scheme-relative (`//host/a`)
    /// and path-only (`/a/{b}`) forms.
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let (rest, fragment) = split_once_owned(input, '#');
        let (rest, query) = split_once_owned(rest, '?');

        let mut uri = Uri {
            query,
            fragment,
            ..Uri::default()
        };

        let after_scheme = match rest.find("://") {
            Some(idx) if is_scheme(&rest[..idx]) => {
                uri.scheme = Some(rest[..idx].to_ascii_lowercase());
                Some(&rest[idx + 3..])
            }
            _ => rest.strip_prefix("//"),
        };

        match after_scheme {
            Some(remainder) => {
                let (authority, path) = match remainder.find('/') {
                    Some(idx) => remainder.split_at(idx),
                    None => (remainder, ""),
                };
                let (host, port) = split_authority(authority)?;
                if host.is_empty() {
                    if let Some(scheme) = &uri.scheme {
                        return Err(UriError::MissingHost(scheme.clone()));
                    }
                } else {
                    uri.host = Some(host.to_string());
                }
                uri.port = port;
                uri.path = path.to_string();
            }
            None => uri.path = rest.to_string(),
        }

        Ok(uri)
    }

    /// A URI holding only a path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Host component, `None` when absent or empty.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !h.is_empty())
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn set_host(&mut self, host: Option<String>) {
        self.host = host.filter(|h| !h.is_empty());
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Copy of this URI with another host.
    pub fn with_host(&self, host: Option<String>) -> Self {
        let mut uri = self.clone();
        uri.set_host(host);
        uri
    }

    /// Copy of this URI with another path.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        let mut uri = self.clone();
        uri.set_path(path);
        uri
    }

    /// URI of an HTTP request. When the request target carries no host
    /// (origin form), the `Host` header supplies host and port.
    pub fn from_request<B>(request: &axum::http::Request<B>) -> Self {
        let mut uri = Self::from(request.uri());
        if uri.host().is_some() {
            return uri;
        }

        let header = request
            .headers()
            .get(axum::http::header::HOST)
            .and_then(|value| value.to_str().ok());
        if let Some(Ok((host, port))) = header.map(split_authority) {
            uri.set_host(Some(host.to_string()));
            uri.port = port;
        }
        uri
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(host) = self.host() {
            write!(f, "//{}", host)?;
            if let Some(port) = self.port {
                write!(f, ":{}", port)?;
            }
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl From<&axum::http::Uri> for Uri {
    fn from(uri: &axum::http::Uri) -> Self {
        Self {
            scheme: uri.scheme_str().map(str::to_ascii_lowercase),
            host: uri.host().map(str::to_string),
            port: uri.port_u16(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            fragment: None,
        }
    }
}

fn split_once_owned(input: &str, sep: char) -> (&str, Option<String>) {
    match input.split_once(sep) {
        Some((head, tail)) => (head, Some(tail.to_string())),
        None => (input, None),
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn split_authority(authority: &str) -> Result<(&str, Option<u16>), UriError> {
    // userinfo is not routed on
    let authority = match authority.rfind('@') {
        Some(idx) => &authority[idx + 1..],
        None => authority,
    };

    // [v6]:port
    let port_sep = if authority.starts_with('[') {
        authority.find(']').and_then(|end| {
            authority[end..].find(':').map(|colon| end + colon)
        })
    } else {
        authority.rfind(':')
    };

    match port_sep {
        Some(idx) => {
            let port = &authority[idx + 1..];
            if port.is_empty() {
                return Ok((&authority[..idx], None));
            }
            let port = port
                .parse::<u16>()
                .map_err(|_| UriError::InvalidPort(port.to_string()))?;
            Ok((&authority[..idx], Some(port)))
        }
        None => Ok((authority, None)),
    }
}
