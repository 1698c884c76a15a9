use crate::http11::{decode_text, encode_form, parse_header_map, parse_response};
use crate::http11::{write_get, write_post};
use crate::parsed_url::ParsedUrl;
use crate::transport::Transport;
use crate::Error;
use http::{HeaderMap, StatusCode};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Methods this client can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`, never with a body.
    Get,
    /// `POST` with a form encoded body.
    Post,
}

impl Method {
    /// `"POST"` (case sensitive) is `Post`, anything else is `Get`.
    pub fn from_name(name: &str) -> Method {
        match name {
            "POST" => Method::Post,
            "GET" => Method::Get,
            _ => {
                warn!("Unrecognized method {:?}, sending GET", name);
                Method::Get
            }
        }
    }

    /// The method as written in the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Numeric status code from the status line.
    pub code: u16,
    /// Status line and headers, without the blank line separating them from the body.
    pub header: String,
    /// Everything after the first blank line, verbatim.
    pub body: String,
}

impl Default for Response {
    /// The "not yet populated" value. A successful exchange overwrites all fields.
    fn default() -> Self {
        Response {
            code: 500,
            header: String::new(),
            body: String::new(),
        }
    }
}

impl Response {
    /// The status code as an `http::StatusCode`, if it is a valid one.
    pub fn status(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.code).ok()
    }

    /// Parse the header block into a `HeaderMap`.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        parse_header_map(&self.header)
    }
}

/// Report form: the code on its own line, the header, a blank line, the body.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n\n{}", self.code, self.header, self.body)
    }
}

type Observer = Arc<dyn Fn(Method, &Response) + Send + Sync>;

/// Blocking HTTP/1.1 client.
///
/// The client holds no connection. Every call opens its own, so a `Client`
/// can be shared between threads freely.
#[derive(Clone, Default)]
pub struct Client {
    timeout: Option<Duration>,
    observer: Option<Observer>,
}

impl Client {
    /// Client without timeout or observer.
    pub fn new() -> Self {
        Client::default()
    }

    /// Give up connecting, sending or receiving after `timeout`.
    ///
    /// Without a timeout a peer that never closes the connection blocks forever.
    /// A zero duration means no timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout == Duration::from_secs(0) {
            debug!("zero timeout, blocking without deadline");
            None
        } else {
            Some(timeout)
        };
        self
    }

    /// Be told about every successful response, e.g. to print it.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(Method, &Response) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Send a GET request. `params` are accepted but never sent.
    pub fn get(&self, url: &str, params: Option<&[(&str, &str)]>) -> Result<Response, Error> {
        if params.is_some() {
            debug!("GET ignores params");
        }

        let url = ParsedUrl::parse(url)?;
        let req = write_get(&url);

        self.exchange(Method::Get, &url, &req)
    }

    /// Send a POST request with `params` form encoded as body.
    pub fn post(&self, url: &str, params: Option<&[(&str, &str)]>) -> Result<Response, Error> {
        let url = ParsedUrl::parse(url)?;
        let body = params.map(encode_form);
        let req = write_post(&url, body.as_deref());

        self.exchange(Method::Post, &url, &req)
    }

    /// POST if `method` is exactly `"POST"`, otherwise GET.
    pub fn dispatch(
        &self,
        url: &str,
        method: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Response, Error> {
        match Method::from_name(method) {
            Method::Post => self.post(url, params),
            Method::Get => self.get(url, params),
        }
    }

    fn exchange(&self, method: Method, url: &ParsedUrl, req: &[u8]) -> Result<Response, Error> {
        info!("{} {}", method, url);

        // dropping the transport on any error below releases the socket.
        let mut transport = Transport::connect(url.connect_host(), url.port(), self.timeout)?;

        transport.send(req)?;
        let raw = transport.receive_until_close()?;

        transport.close();

        let raw = decode_text(raw)?;
        let (code, header, body) = parse_response(&raw)?;

        let res = Response {
            code,
            header: header.to_string(),
            body: body.to_string(),
        };

        info!("{} {} -> {}", method, url, res.code);

        if let Some(observer) = &self.observer {
            observer(method, &res);
        }

        Ok(res)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("timeout", &self.timeout)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
