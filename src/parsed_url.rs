//! Splitting an absolute url into host, port, path and query.

use crate::Error;
use http::Uri;
use std::fmt;

/// Port used when the url doesn't carry one. The scheme is never consulted.
pub const DEFAULT_PORT: u16 = 80;

/// An absolute url split into the parts needed to open a connection and
/// write a request line.
///
/// `host` is never empty and `path` always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    host: String,
    port: u16,
    path: String,
    query: Option<String>,
}

impl ParsedUrl {
    /// Parse an absolute url such as `http://example.com:8080/path?q=1`.
    ///
    /// A missing path becomes `/`, a missing port becomes [`DEFAULT_PORT`].
    ///
    /// [`DEFAULT_PORT`]: constant.DEFAULT_PORT.html
    pub fn parse(url: &str) -> Result<Self, Error> {
        let uri: Uri = url.parse()?;

        let host = match uri.host() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => return Err(Error::InvalidUrl(format!("missing host: {}", url))),
        };

        if uri.scheme_str() == Some("https") {
            warn!("https is not supported, talking plain http to {}", host);
        }

        let authority = uri.authority().map(|a| a.as_str()).unwrap_or("");

        let port = match port_text(authority) {
            Some("") | None => DEFAULT_PORT,
            Some(p) => match p.parse::<u16>() {
                Ok(0) | Err(_) => {
                    return Err(Error::InvalidUrl(format!("invalid port: {}", p)));
                }
                Ok(n) => n,
            },
        };

        let path = match uri.path() {
            "" => "/".to_string(),
            p if !p.starts_with('/') => format!("/{}", p),
            p => p.to_string(),
        };

        let query = uri.query().map(|q| q.to_string());

        let parsed = ParsedUrl {
            host,
            port,
            path,
            query,
        };

        trace!("parsed url {:?} -> {:?}", url, parsed);

        Ok(parsed)
    }

    /// Host as written in the url. IPv6 literals keep their brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port to connect to, [`DEFAULT_PORT`] unless the url has one.
    ///
    /// [`DEFAULT_PORT`]: constant.DEFAULT_PORT.html
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Host in the form a resolver accepts, i.e. without IPv6 brackets.
    pub fn connect_host(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }

    /// The request target in origin-form: `path` or `path?query`.
    pub fn request_target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Value for the `Host` header. The port is only included when it
    /// isn't the default.
    pub fn host_header(&self) -> String {
        if self.port == DEFAULT_PORT {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// The text after the host's `:` in an authority, if there is a colon.
///
/// `http::Uri::port()` gives `None` for ports that don't fit a `u16`, so the
/// authority is split here instead.
fn port_text(authority: &str) -> Option<&str> {
    let host_port = authority.rsplit('@').next().unwrap_or("");

    let after_host = if host_port.starts_with('[') {
        let end = host_port.find(']')?;
        &host_port[end + 1..]
    } else {
        host_port
    };

    after_host.find(':').map(|i| &after_host[i + 1..])
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.host, self.port, self.request_target())
    }
}
