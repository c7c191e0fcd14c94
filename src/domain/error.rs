use thiserror::Error;

#[derive(Error, Debug)]
pub enum FairError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Failure of a single provider lookup.
///
/// These never cross the resolver boundary; they are downgraded to the
/// unresolved marker once the retry budget is spent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Timeout, dropped connection or rate-limit rejection. Retried.
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// The provider refused the request for a reason retrying won't fix.
    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl LookupError {
    pub fn is_transient(&self) -> bool {
        matches!(self, LookupError::Transient(_))
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() {
            return LookupError::Transient(e.to_string());
        }
        if e.is_decode() {
            return LookupError::Malformed(e.to_string());
        }
        match e.status() {
            Some(status) if status.as_u16() == 429 || status.is_server_error() => {
                LookupError::Transient(e.to_string())
            }
            Some(_) => LookupError::Rejected(e.to_string()),
            None => LookupError::Transient(e.to_string()),
        }
    }
}
