use tracing::instrument;

use crate::error::{ToolError, ToolResult};
use crate::format::{yes_no, MarkdownTable};

impl super::SalesforceTools {
    /// Objects whose API name or label contains any whitespace-separated
    /// term of `pattern`, case-insensitively, in catalog order.
    #[instrument(skip(self))]
    pub async fn search_objects(&self, pattern: &str) -> ToolResult {
        const CONTEXT: &str = "Error retrieving Salesforce objects";

        let rest = self.rest(CONTEXT).await?;
        let catalog = rest
            .describe_global()
            .await
            .map_err(|err| ToolError::remote(CONTEXT, err))?;

        let terms: Vec<&str> = pattern.split_whitespace().collect();
        let matches: Vec<_> = catalog
            .sobjects
            .iter()
            .filter(|object| terms.iter().any(|term| object.matches_term(term)))
            .collect();

        if matches.is_empty() {
            return Ok(format!("No Salesforce objects found matching '{pattern}'."));
        }

        let mut table = MarkdownTable::new(["API Name", "Label", "Custom Object"]);
        for object in &matches {
            table.row([object.name.as_str(), object.label.as_str(), yes_no(object.custom)]);
        }

        Ok(format!(
            "Found {} Salesforce objects matching '{}':\n\n{}",
            matches.len(),
            pattern,
            table.render()
        ))
    }
}
