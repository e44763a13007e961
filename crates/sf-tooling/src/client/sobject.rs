use busbar_sf_client::security::{soql, url as url_security};
use serde::Serialize;
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};

/// Response from create operations.
#[derive(Debug, Clone, serde::Deserialize)]
pub(super) struct CreateResponse {
    pub(super) id: String,
    pub(super) success: bool,
    #[serde(default)]
    pub(super) errors: Vec<CreateError>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub(super) struct CreateError {
    pub(super) message: String,
}

impl super::ToolingClient {
    /// Create a Tooling API SObject and return its id.
    #[instrument(skip(self, record))]
    pub async fn create<T: Serialize>(&self, sobject: &str, record: &T) -> Result<String> {
        if !soql::is_safe_sobject_name(sobject) {
            return Err(Error::new(ErrorKind::Salesforce {
                error_code: "INVALID_SOBJECT".to_string(),
                message: format!("Invalid SObject name: {}", sobject),
            }));
        }
        let path = format!("sobjects/{}", sobject);
        let result: CreateResponse = self.client.tooling_post(&path, record).await?;

        if result.success {
            Ok(result.id)
        } else {
            Err(Error::new(ErrorKind::Salesforce {
                error_code: "CREATE_FAILED".to_string(),
                message: result
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            }))
        }
    }

    /// Update fields on a Tooling API SObject.
    #[instrument(skip(self, fields))]
    pub async fn update<T: Serialize>(&self, sobject: &str, id: &str, fields: &T) -> Result<()> {
        let path = record_path(sobject, id)?;
        self.client
            .tooling_patch(&path, fields)
            .await
            .map_err(Into::into)
    }

    /// Delete a Tooling API SObject.
    #[instrument(skip(self))]
    pub async fn delete(&self, sobject: &str, id: &str) -> Result<()> {
        let path = record_path(sobject, id)?;
        self.client.tooling_delete(&path).await.map_err(Into::into)
    }
}

pub(super) fn record_path(sobject: &str, id: &str) -> Result<String> {
    url_security::sobject_path(sobject, id).ok_or_else(|| {
        Error::new(ErrorKind::Salesforce {
            error_code: "INVALID_ID".to_string(),
            message: format!("Invalid {} id: {}", sobject, id),
        })
    })
}
