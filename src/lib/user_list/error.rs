use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Remote operations the controller can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The only failure a remote call can produce.
/// The cause is kept for diagnostics; callers are not meant to branch on it.
#[derive(Debug, Error)]
#[error("{operation} request failed: {cause}")]
pub struct RemoteCallFailed {
    pub operation: Operation,
    #[source]
    pub cause: FailureCause,
}

#[derive(Debug, Error)]
pub enum FailureCause {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {}", .detail.as_deref().unwrap_or("no details"))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl RemoteCallFailed {
    pub fn transport(operation: Operation, err: reqwest::Error) -> Self {
        RemoteCallFailed {
            operation,
            cause: FailureCause::Transport(err),
        }
    }

    pub fn status(operation: Operation, status: StatusCode, detail: Option<String>) -> Self {
        RemoteCallFailed {
            operation,
            cause: FailureCause::Status { status, detail },
        }
    }

    /// Status code the store answered with, if the request got that far.
    pub fn status_code(&self) -> Option<StatusCode> {
        match &self.cause {
            FailureCause::Status { status, .. } => Some(*status),
            FailureCause::Transport(err) => err.status(),
        }
    }
}

/// Problems building the HTTP store out of the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base URL {0:?} must be an http(s) URL with a path")]
    UnsupportedBaseUrl(String),
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
