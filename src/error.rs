use std::fmt;
use std::io;

/// Possible errors from this crate.
///
/// Every variant aborts the request it came from. There is no partial response.
#[derive(Debug)]
pub enum Error {
    /// The url could not be parsed or has no host.
    InvalidUrl(String),
    /// The TCP connection could not be established (DNS, refused, unreachable).
    Connection(io::Error),
    /// Sending the request or receiving the response failed after connecting.
    Transmission(io::Error),
    /// The response bytes lack a status line or a header/body boundary.
    MalformedResponse(String),
    /// The header block was rejected by the `httparse` crate.
    Http11Parser(httparse::Error),
}

impl Error {
    /// Tell if this is a connect failure, i.e. no bytes were ever sent.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidUrl(v) => write!(f, "invalid url: {}", v),
            Error::Connection(v) => write!(f, "connection failed: {}", v),
            Error::Transmission(v) => write!(f, "transmission failed: {}", v),
            Error::MalformedResponse(v) => write!(f, "malformed response: {}", v),
            Error::Http11Parser(v) => write!(f, "http11 parser: {}", v),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) | Error::Transmission(e) => Some(e),
            Error::Http11Parser(e) => Some(e),
            _ => None,
        }
    }
}

impl From<httparse::Error> for Error {
    fn from(e: httparse::Error) -> Self {
        Error::Http11Parser(e)
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(e: http::uri::InvalidUri) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}
