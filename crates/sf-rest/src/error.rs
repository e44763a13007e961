pub type Result<T> = std::result::Result<T, Error>;

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

    /// True when the org does not have the requested sObject.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Transport or API failure reported by the HTTP layer.
    #[error("Client error: {0}")]
    Client(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected locally before anything was sent, such as an unsafe field name.
    #[error("Salesforce error: {error_code} - {message}")]
    Salesforce { error_code: String, message: String },
}

impl From<busbar_sf_client::Error> for Error {
    fn from(err: busbar_sf_client::Error) -> Self {
        let kind = if err.is_not_found() {
            ErrorKind::NotFound(err.to_string())
        } else {
            ErrorKind::Client(err.to_string())
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}
