use busbar_sf_rest::QueryBuilder;
use tracing::instrument;

use crate::error::Result;
use crate::types::ValidationRule;

impl super::ToolingClient {
    /// Validation rules defined on `sobject`, active or not, ordered by name.
    #[instrument(skip(self))]
    pub async fn get_validation_rules(&self, sobject: &str) -> Result<Vec<ValidationRule>> {
        let builder = QueryBuilder::<ValidationRule>::new("ValidationRule")?
            .select(&[
                "Id",
                "ValidationName",
                "Active",
                "Description",
                "EntityDefinition.DeveloperName",
                "ErrorDisplayField",
                "ErrorMessage",
            ])?
            .where_eq("EntityDefinition.DeveloperName", sobject)?
            .order_by("ValidationName", true)?;

        Ok(self.query_builder(&builder).await?.records)
    }
}
