use thiserror::Error;

/// Everything that can go wrong between a widget and its backends.
///
/// Widgets never show these to the user; they log them and substitute a
/// static message instead.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("request to {url} failed: {source}")] Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")] Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid {endpoint} payload: {source}")] Validation {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("websocket error: {0}")] WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("client storage error: {0}")] Storage(String),

    #[error("invalid configuration: {0}")] Config(String),
}

impl From<std::io::Error> for WidgetError {
    fn from(err: std::io::Error) -> Self {
        WidgetError::Storage(err.to_string())
    }
}

impl From<url::ParseError> for WidgetError {
    fn from(err: url::ParseError) -> Self {
        WidgetError::Config(err.to_string())
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;
