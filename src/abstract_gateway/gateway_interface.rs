use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, ServerError>;

// JSON parse errors are sticky data problems.
impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> ServerError {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::DataLayer,
            message: err.to_string(),
        })
    }
}

/// Express whether the error seems to be happening in the server or the data.
#[derive(Debug)]
pub enum ErrorLayer {
    /// The request itself has structural issues like a malformed URL, a node
    /// path that doesn't resolve in the displayed tree, or an attempt to edit a
    /// read-only grid row.  This should not be used for a search that simply
    /// matches nothing; that's an empty view, not an error.
    BadInput,
    /// The error seems to involve the server, like a 500 response or a
    /// connection that could not be established.
    ServerLayer,
    /// The error seems to be related to the resource data rather than the
    /// server, like a 404 for a resource path or a body that isn't JSON.
    DataLayer,
    /// We're not sure if it was a server issue or a data issue.
    UnknownLayer,
}

/// ServerError payload to provide details about what went wrong for
/// investigation purposes.
#[derive(Debug)]
pub struct ErrorDetails {
    /// Attempt to distinguish failures due to server bugs from failures due to
    /// the resource data.  For example a 500 response from a server would be a
    /// `ServerLayer` problem, but if a 404 was instead returned, that would be
    /// a `DataLayer` problem.
    pub layer: ErrorLayer,
    /// Stringified version of the lower level error.
    pub message: String,
}

/// Does a retry makes sense or not?
///
/// Nothing in this crate retries; the distinction is reported so that a
/// caller (or a human at the console) can decide whether hitting "refresh"
/// again is worthwhile.
#[derive(Debug)]
pub enum ServerError {
    /// An error that will persist until something changes.  For example a 404.
    StickyProblem(ErrorDetails),
    /// An error that might go away if retried later.  For example a 504 "Gateway
    /// timeout".
    TransientProblem(ErrorDetails),
    Unsupported,
}

impl ServerError {
    pub fn bad_input(message: impl Into<String>) -> ServerError {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: message.into(),
        })
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, ServerError::TransientProblem(_))
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::StickyProblem(details) => {
                write!(f, "{:?}: {}", details.layer, details.message)
            }
            ServerError::TransientProblem(details) => {
                write!(f, "{:?} (transient): {}", details.layer, details.message)
            }
            ServerError::Unsupported => write!(f, "unsupported"),
        }
    }
}

impl std::error::Error for ServerError {}

/// Unified exposure for fetching a resource tree, either from a live
/// administration server's REST interface or from a JSON dump on disk.
///
/// `params` become query parameters for the remote case; this is where the
/// `depth` bound and (unfortunately, in the clear) the credentials go.  The
/// local case has no use for them.
///
/// ## Runtime Assumptions
///
/// Callers await each fetch before handling the next console event, so
/// implementations don't need to worry about overlapping requests from the
/// same controller.
#[async_trait]
pub trait ResourceGateway {
    /// Human-readable description of where resources come from, used in logs
    /// and the console status line.
    fn describe(&self) -> String;

    /// Fetch and parse the JSON document for the given resource path.
    async fn fetch_json(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Value>;
}
