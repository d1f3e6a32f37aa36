use hyper::StatusCode;
use std::fmt::{self, Debug, Display};
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct DisplayError(Error);

impl Debug for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T: Into<Error>> From<T> for DisplayError {
    fn from(display: T) -> Self {
        DisplayError(display.into())
    }
}

pub trait IoErrorExt {
    fn applies_to(&self) -> AppliesTo;
}

impl IoErrorExt for io::Error {
    fn applies_to(&self) -> AppliesTo {
        match self.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset => AppliesTo::Connection,
            _ => AppliesTo::Listener,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppliesTo {
    Connection,
    Listener,
}

/// Terminal outcomes of a stream request that aren't a file body.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("missing song parameter")]
    BadRequest,
    #[error("song escapes the music root: {0:?}")]
    PathTraversal(String),
    #[error("cannot open {}: {source}", path.display())]
    NotFound { path: PathBuf, source: io::Error },
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("range not satisfiable for {size} bytes")]
    RangeNotSatisfiable { size: u64 },
    #[error("modified since the given date")]
    PreconditionFailed,
    #[error("not modified")]
    NotModified(SystemTime),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl StreamError {
    pub fn status(&self) -> StatusCode {
        match self {
            StreamError::BadRequest => StatusCode::BAD_REQUEST,
            StreamError::PathTraversal(_)
            | StreamError::NotFound { .. }
            | StreamError::NotAFile(_) => StatusCode::NOT_FOUND,
            StreamError::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            StreamError::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
            StreamError::NotModified(_) => StatusCode::NOT_MODIFIED,
            StreamError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body shown to the client. Never includes filesystem details.
    pub fn public_message(&self) -> Option<&'static str> {
        match self {
            StreamError::BadRequest => Some("Missing song parameter"),
            StreamError::PathTraversal(_)
            | StreamError::NotFound { .. }
            | StreamError::NotAFile(_) => Some("File not found"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_is_indistinguishable_from_missing() {
        let traversal = StreamError::PathTraversal("../secret.txt".into());
        let missing = StreamError::NotFound {
            path: PathBuf::from("music/missing.mp3"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(traversal.status(), missing.status());
        assert_eq!(traversal.public_message(), missing.public_message());
    }

    #[test]
    fn client_hangups_only_affect_their_connection() {
        for kind in [
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionRefused,
        ] {
            assert_eq!(io::Error::from(kind).applies_to(), AppliesTo::Connection);
        }
        for kind in [io::ErrorKind::AddrInUse, io::ErrorKind::PermissionDenied] {
            assert_eq!(io::Error::from(kind).applies_to(), AppliesTo::Listener);
        }
    }

    #[test]
    fn statuses() {
        assert_eq!(StreamError::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            StreamError::RangeNotSatisfiable { size: 10 }.status(),
            StatusCode::RANGE_NOT_SATISFIABLE
        );
        let not_modified = StreamError::NotModified(SystemTime::UNIX_EPOCH);
        assert_eq!(not_modified.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(not_modified.public_message(), None);
    }
}
