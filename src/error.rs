/// All errors that can occur while talking to the tournament backend.
#[derive(thiserror::Error, Debug)]
pub enum TorneoError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}{}", suffix(.message))]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The backend answered 2xx but flagged the call with `"success": false`.
    #[error("request to {url} was rejected: {message}")]
    Rejected { url: String, message: String },

    /// A kickoff time was not a zero-padded 24-hour `HH:MM` string.
    #[error("invalid kickoff time {0:?}, expected HH:MM")]
    InvalidKickoff(String),

    /// A match date was not a `YYYY-MM-DD` string.
    #[error("invalid match date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The repository holds a different resource than the one requested.
    #[error("cached resource for {key} is not {expected}")]
    ResourceMismatch { key: String, expected: &'static str },

    /// Client configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, TorneoError>;
