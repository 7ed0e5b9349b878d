use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The directory service answered with a non-zero `errcode`.
    #[error("{message} (errcode {code})")]
    Api { code: i64, message: String },

    /// The HTTP exchange itself failed: non-2xx status, timeout or network error.
    #[error("{message}")]
    Transport {
        status: Option<StatusCode>,
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Builds a transport error for a response that came back with a non-2xx status.
    pub fn from_status(status: StatusCode, url: &str) -> Self {
        let message = status_message(status, url)
            .unwrap_or_else(|| format!("request failed with status code {}", status.as_u16()));
        Error::Transport {
            status: Some(status),
            url: url.to_string(),
            message,
            source: None,
        }
    }

    /// Builds a transport error for a request that never produced a response.
    pub fn from_transport(err: reqwest::Error, url: &str) -> Self {
        // The request URL carries the access token in its query string.
        let err = err.without_url();
        if let Some(status) = err.status() {
            let mut mapped = Self::from_status(status, url);
            if let Error::Transport { source, .. } = &mut mapped {
                *source = Some(err);
            }
            return mapped;
        }
        Error::Transport {
            status: None,
            url: url.to_string(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Remote `errcode` for application errors.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Human-readable message for the HTTP statuses the directory API is known to produce.
/// Statuses outside the table return `None` so the caller keeps its default message.
pub fn status_message(status: StatusCode, url: &str) -> Option<String> {
    let message = match status.as_u16() {
        400 => "bad request",
        401 => "unauthorized, please log in",
        403 => "access denied",
        404 => return Some(format!("request address error: {url}")),
        408 => "request timeout",
        500 => "internal server error",
        501 => "service not implemented",
        502 => "bad gateway",
        503 => "service unavailable",
        504 => "gateway timeout",
        505 => "HTTP version not supported",
        _ => return None,
    };
    Some(message.to_string())
}
