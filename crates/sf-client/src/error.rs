//! Errors raised while talking to an org.

pub type Result<T> = std::result::Result<T, Error>;

/// A failed request, classified by [`ErrorKind`].
///
/// Display renders only the kind; the underlying transport or parse error,
/// when there is one, is kept as the `source`.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// True for a 404, or a `NOT_FOUND` error code in the response body.
    ///
    /// Describing an sObject the org does not have yields the latter.
    pub fn is_not_found(&self) -> bool {
        match &self.kind {
            ErrorKind::NotFound(_) => true,
            ErrorKind::SalesforceApi { error_code, .. } => error_code == "NOT_FOUND",
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Non-success status without a Salesforce error body.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// 401: the session is missing, expired or revoked.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// 403: the integration user lacks a permission.
    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// `[{"errorCode": .., "message": .., "fields": [..]}]` body from the org.
    #[error("Salesforce API error: {error_code} - {message}")]
    SalesforceApi {
        error_code: String,
        message: String,
        fields: Vec<String>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = match err.status() {
            _ if err.is_timeout() => ErrorKind::Timeout,
            _ if err.is_connect() => ErrorKind::Connection(err.to_string()),
            _ if err.is_decode() => ErrorKind::Json(err.to_string()),
            Some(status) => ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => ErrorKind::Other(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {err}")), err)
    }
}
