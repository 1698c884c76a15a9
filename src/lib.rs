#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all)]

//! A blocking HTTP/1.1 client written directly against a TCP socket.
//!
//! The point of this library is to show the bytes that go over the wire for a
//! GET or POST, and how the bytes coming back are split into status code,
//! headers and body. No HTTP client library is involved, only the `http`
//! crate's types for parsing urls and holding headers.
//!
//! ## In scope
//!
//! * `GET` and form encoded `POST` requests.
//! * `Connection: close` on every request, one connection per request.
//! * Reading the response until the server closes the connection.
//!
//! ## Out of scope
//!
//! * TLS. An `https` url is still spoken to in plain text on port 80
//!   unless a port is given.
//! * `Transfer-Encoding: chunked`, keep-alive, redirects, cookies, compression.
//! * Using `Content-Length` to delineate the response body.
//!
//! # Example
//!
//! ```no_run
//! let client = rawhttp::Client::new();
//!
//! let res = client.post(
//!     "http://127.0.0.1:8080/form",
//!     Some(&[("a", "1"), ("b", "two words")][..]),
//! )?;
//!
//! println!("{} {}", res.code, res.body);
//! # Ok::<(), rawhttp::Error>(())
//! ```

#[macro_use]
extern crate log;

mod client;
mod error;

#[doc(hidden)]
pub mod http11;

pub mod parsed_url;
pub mod transport;

pub use client::{Client, Method, Response};
pub use error::Error;
pub use parsed_url::ParsedUrl;
