use serde::Serialize;
use tracing::error;

use crate::error::Error;
use crate::store::Entries;

/// Response status codes used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
    NotImplemented,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
            Status::NotImplemented => 501,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
            Status::NotImplemented => "Not Implemented",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// A JSON response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: Status,
    pub body: Vec<u8>,
}

impl Response {
    /// Serialize `data` as the JSON body
    pub fn json<T: Serialize + ?Sized>(status: Status, data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => Self { status, body },
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self {
                    status: Status::InternalServerError,
                    body: br#"{"error":"Failed to serialize response"}"#.to_vec(),
                }
            }
        }
    }

    /// 200 response carrying the given entries as a JSON object
    pub fn ok(entries: &Entries) -> Self {
        Self::json(Status::Ok, entries)
    }

    /// Error response: `{"error": <message>}`
    pub fn error(err: &Error) -> Self {
        let message = err.to_string();
        Self::json(err.status(), &ErrorBody { error: &message })
    }

    /// Encode the response to HTTP/1.1 bytes
    pub fn encode(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\n\
             Server: {}/{}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            self.status.code(),
            self.status.reason(),
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.body.len(),
        );

        let mut buf = Vec::with_capacity(head.len() + self.body.len());
        buf.extend_from_slice(head.as_bytes());
        buf.extend_from_slice(&self.body);
        buf
    }
}

impl From<Error> for Response {
    fn from(err: Error) -> Self {
        Self::error(&err)
    }
}
