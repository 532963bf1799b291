/// Errors that can occur while asking the suggestion service for related games.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by the suggestion service")]
    RateLimit,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
