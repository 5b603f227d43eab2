use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    #[error("request unauthorized")]
    Unauthorized,

    #[error("tiny URL entry not found")]
    EntryNotFound,

    #[error("path {path} not found")]
    PathNotFound { path: String },

    #[error("bad request: {detail}")]
    BadRequest { detail: String },

    #[error("received unexpected http code {status}: {detail}")]
    UnexpectedStatus { status: StatusCode, detail: String },

    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl ClientError {
    /// Whether the server rejected the credential used for the call.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::EntryNotFound | ClientError::PathNotFound { .. }
        )
    }

    /// Status code of the response that produced this error, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ClientError::EntryNotFound | ClientError::PathNotFound { .. } => {
                Some(StatusCode::NOT_FOUND)
            }
            ClientError::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            ClientError::Transport { .. }
            | ClientError::InvalidRequest(_)
            | ClientError::Decode { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
