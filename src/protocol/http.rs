//! HTTP/1.1 request parsing

use bytes::Bytes;
use std::fmt;

use crate::error::{Error, Result};

/// Largest request head (request line plus headers) accepted
pub const MAX_HEAD_SIZE: usize = 64 * 1024;
/// Largest request body accepted
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Request methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    /// Any other method token, kept verbatim
    Other(String),
}

impl Method {
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "PUT" => Method::Put,
            "POST" => Method::Post,
            "DELETE" => Method::Delete,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Raw request target, query string included
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parser for HTTP/1.1 requests
pub struct Parser;

impl Parser {
    /// Parse a request from buffer.
    ///
    /// Returns `Ok(None)` while the buffer holds an incomplete request, and
    /// `(Request, consumed_bytes)` once a full request is available.
    pub fn parse(buffer: &[u8]) -> Result<Option<(Request, usize)>> {
        let (head_end, body_start) = match find_head_end(buffer) {
            Some(bounds) => bounds,
            None if buffer.len() > MAX_HEAD_SIZE => {
                return Err(bad_request("Request header too large"));
            }
            None => return Ok(None),
        };
        if head_end > MAX_HEAD_SIZE {
            return Err(bad_request("Request header too large"));
        }

        let head = std::str::from_utf8(&buffer[..head_end])
            .map_err(|_| bad_request("Request header is not valid UTF-8"))?;
        // Lines end in CRLF or a bare LF
        let mut lines = head
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line));

        let request_line = lines.next().unwrap_or_default();
        let (method, path) = Self::parse_request_line(request_line)?;

        let mut request = Request::new(method, path);
        for line in lines {
            request.headers.push(Self::parse_header(line)?);
        }

        if request.header("transfer-encoding").is_some() {
            return Err(bad_request("Transfer-Encoding is not supported"));
        }
        let body_len = match request.header("content-length") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| bad_request(format!("Bad Content-Length ('{}')", value)))?,
            None => 0,
        };
        if body_len > MAX_BODY_SIZE {
            return Err(bad_request("Request body too large"));
        }

        let total = body_start + body_len;
        if buffer.len() < total {
            return Ok(None);
        }
        request.body = Bytes::copy_from_slice(&buffer[body_start..total]);

        Ok(Some((request, total)))
    }

    fn parse_request_line(line: &str) -> Result<(Method, String)> {
        let mut parts = line.split(' ');
        let (method, path, version) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(m), Some(p), Some(v), None) if !m.is_empty() && !p.is_empty() => (m, p, v),
            _ => return Err(bad_request(format!("Bad request syntax ('{}')", line))),
        };

        if !version.starts_with("HTTP/1.") {
            return Err(bad_request(format!("Bad request version ('{}')", version)));
        }

        Ok((Method::from_token(method), path.to_string()))
    }

    fn parse_header(line: &str) -> Result<(String, String)> {
        match line.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(bad_request(format!("Bad header line ('{}')", line))),
        }
    }
}

/// Locate the empty line closing the request head.
///
/// Returns `(head_len, body_start)`; the head excludes its final line ending.
fn find_head_end(buffer: &[u8]) -> Option<(usize, usize)> {
    buffer
        .iter()
        .enumerate()
        .filter(|&(_, b)| *b == b'\n')
        .find_map(|(i, _)| {
            let rest = &buffer[i + 1..];
            if rest.starts_with(b"\n") {
                Some((i, i + 2))
            } else if rest.starts_with(b"\r\n") {
                Some((i, i + 3))
            } else {
                None
            }
        })
}

fn bad_request(msg: impl Into<String>) -> Error {
    Error::BadRequest(msg.into())
}
