use crate::parsed_url::ParsedUrl;
use crate::Error;
use http::header::{HeaderMap, HeaderName, HeaderValue};

/// Separator between the header block and the body.
pub const END_OF_HEADER: &str = "\r\n\r\n";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Encode key/value pairs as `application/x-www-form-urlencoded`.
///
/// Pairs keep their order. Spaces become `+`, reserved characters are
/// percent-escaped.
pub fn encode_form(params: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Write an http/1.1 GET request.
///
/// The request never has a body.
pub fn write_get(url: &ParsedUrl) -> Vec<u8> {
    let mut req = String::with_capacity(256);

    req.push_str(&format!("GET {} HTTP/1.1\r\n", url.request_target()));
    req.push_str(&format!("Host: {}\r\n", url.host_header()));
    req.push_str(&format!("Accept: {}\r\n", ACCEPT));
    req.push_str("Connection: close\r\n");
    req.push_str("\r\n");

    debug!("write_get: {:?}", req);

    req.into_bytes()
}

/// Write an http/1.1 POST request with an already form encoded body.
///
/// No body means `Content-Length: 0`. Nothing follows the body, so the
/// content-length covers exactly the bytes after the blank line.
pub fn write_post(url: &ParsedUrl, body: Option<&str>) -> Vec<u8> {
    let body = body.unwrap_or("");

    let mut req = String::with_capacity(256 + body.len());

    req.push_str(&format!("POST {} HTTP/1.1\r\n", url.request_target()));
    req.push_str(&format!("Host: {}\r\n", url.host_header()));
    req.push_str(&format!("Content-Type: {}\r\n", FORM_CONTENT_TYPE));
    req.push_str(&format!("Content-Length: {}\r\n", body.len()));
    req.push_str("Connection: close\r\n");
    req.push_str("\r\n");
    req.push_str(body);

    debug!("write_post: {:?}", req);

    req.into_bytes()
}

/// Turn the bytes read off the socket into text.
pub fn decode_text(raw: Vec<u8>) -> Result<String, Error> {
    String::from_utf8(raw).map_err(|e| {
        Error::MalformedResponse(format!("response is not utf-8: {}", e.utf8_error()))
    })
}

/// Byte offset of the first `\r\n\r\n`.
fn header_end(raw: &str) -> Result<usize, Error> {
    raw.find(END_OF_HEADER)
        .ok_or_else(|| Error::MalformedResponse("no header/body boundary".into()))
}

/// Status code from the status line, `HTTP/1.1 <code> <reason>`.
pub fn parse_code(raw: &str) -> Result<u16, Error> {
    let status_line = raw.split("\r\n").next().unwrap_or("");

    let code = status_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| Error::MalformedResponse(format!("bad status line: {:?}", status_line)))?;

    code.parse()
        .map_err(|_| Error::MalformedResponse(format!("bad status code: {:?}", code)))
}

/// Everything before the first `\r\n\r\n`, i.e. the status line and headers
/// without the blank line terminator.
pub fn parse_headers(raw: &str) -> Result<&str, Error> {
    let end = header_end(raw)?;
    Ok(&raw[..end])
}

/// Everything after the first `\r\n\r\n`, verbatim. Later occurrences of the
/// separator belong to the body.
pub fn parse_body(raw: &str) -> Result<&str, Error> {
    let end = header_end(raw)?;
    Ok(&raw[end + END_OF_HEADER.len()..])
}

/// Parse a full response into `(code, header, body)`.
///
/// The boundary is checked before the status line, so a response that is
/// cut short reports the missing boundary.
pub fn parse_response(raw: &str) -> Result<(u16, &str, &str), Error> {
    let header = parse_headers(raw)?;
    let body = parse_body(raw)?;
    let code = parse_code(header)?;

    debug!("parse_response: {} ({} header bytes, {} body bytes)", code, header.len(), body.len());

    Ok((code, header, body))
}

/// Parse a header block (as returned by [`parse_headers`]) into a `HeaderMap`.
///
/// Header names or values the `http` crate refuses are dropped.
///
/// [`parse_headers`]: fn.parse_headers.html
pub fn parse_header_map(header: &str) -> Result<HeaderMap, Error> {
    let mut buf = Vec::with_capacity(header.len() + END_OF_HEADER.len());
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(END_OF_HEADER.as_bytes());

    trace!("parse_header_map: {:?}", String::from_utf8_lossy(&buf));

    let mut headers = [httparse::EMPTY_HEADER; 128];
    let mut parser = httparse::Response::new(&mut headers);

    let status = parser.parse(&buf)?;

    if status.is_partial() {
        return Err(Error::MalformedResponse("partial header block".into()));
    }

    let mut map = HeaderMap::with_capacity(parser.headers.len());

    for head in parser.headers.iter() {
        let name = HeaderName::from_bytes(head.name.as_bytes());
        let value = HeaderValue::from_bytes(head.value);
        match (name, value) {
            (Ok(name), Ok(value)) => {
                map.append(name, value);
            }
            (Err(e), _) => {
                debug!("Dropping bad header name: {}", e);
            }
            (Ok(name), Err(e)) => {
                debug!("Dropping bad header value ({}): {}", name, e);
            }
        }
    }

    Ok(map)
}
