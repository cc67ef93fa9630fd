use crate::protocol::Status;

/// Errors surfaced while serving a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The request does not address a resource under the store path
    #[error("{0}")]
    ResourceNotFound(String),
    /// A lookup or delete targeted an absent key
    #[error("{0}")]
    KeyNotFound(String),
    /// The bytes on the wire are not a valid HTTP/1.1 request
    #[error("{0}")]
    BadRequest(String),
    /// Method outside GET/PUT/POST/DELETE
    #[error("Unsupported method ('{0}')")]
    UnsupportedMethod(String),
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(format!("Key {} not found", key))
    }

    /// HTTP status reported for this error.
    ///
    /// A missing key is reported as 500, not 404: clients of the service
    /// already depend on that status.
    pub fn status(&self) -> Status {
        match self {
            Error::ResourceNotFound(_) => Status::NotFound,
            Error::BadRequest(_) => Status::BadRequest,
            Error::UnsupportedMethod(_) => Status::NotImplemented,
            Error::KeyNotFound(_) | Error::Internal(_) => Status::InternalServerError,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
