use tokio_tungstenite::tungstenite;

/// Failure of a single request against the local client API.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Invalid request path {path}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("Unexpected response from {path}: {message}")]
    Schema { path: String, message: String },
}

impl ClientError {
    pub(crate) fn schema(path: &str, message: impl ToString) -> Self {
        Self::Schema {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

/// The session channel cannot be established or was lost. Terminal for the observer.
#[derive(thiserror::Error, Debug)]
pub enum ConnectionError {
    #[error("The session channel endpoint has not been published yet (configure `websocket_url`)")]
    EndpointUnavailable,
    #[error("Unable to connect to the session channel at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: Box<tungstenite::Error>,
    },
    #[error("Failed to subscribe to {topic}: {source}")]
    Handshake {
        topic: String,
        #[source]
        source: Box<tungstenite::Error>,
    },
    #[error("Lost the session channel: {0}")]
    Lost(String),
}

/// A frame on the session channel that does not have the expected event shape.
#[derive(thiserror::Error, Debug)]
#[error("Malformed message on the session channel ({reason}): {frame}")]
pub struct MalformedMessageError {
    pub reason: String,
    pub frame: String,
}

impl MalformedMessageError {
    pub(crate) fn new(reason: impl ToString, frame: &str) -> Self {
        Self {
            reason: reason.to_string(),
            frame: frame.to_string(),
        }
    }
}
