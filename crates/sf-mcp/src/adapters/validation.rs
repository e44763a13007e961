use tracing::instrument;

use super::require;
use crate::error::{ToolError, ToolResult};
use crate::format::{or_na, yes_no, MarkdownTable};

const DESCRIPTION_WIDTH: usize = 100;

/// Cut descriptions longer than the column width to 97 characters plus `...`.
fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_WIDTH {
        let head: String = description.chars().take(DESCRIPTION_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}

impl super::SalesforceTools {
    #[instrument(skip(self))]
    pub async fn validation_rules(&self, object: &str) -> ToolResult {
        require(object, "Object name is required")?;
        let context = format!("Error retrieving validation rules for {object}");

        let tooling = self.tooling(&context).await?;
        let rules = tooling
            .get_validation_rules(object.trim())
            .await
            .map_err(|err| ToolError::remote(&context, err))?;

        if rules.is_empty() {
            return Ok(format!("No validation rules found for {object}."));
        }

        let mut table =
            MarkdownTable::new(["Name", "Active", "Error Message", "Error Field", "Description"]);
        for rule in &rules {
            table.row([
                or_na(rule.validation_name.as_deref()).to_string(),
                yes_no(rule.active).to_string(),
                or_na(rule.error_message.as_deref()).to_string(),
                or_na(rule.error_display_field.as_deref()).to_string(),
                truncate_description(or_na(rule.description.as_deref())),
            ]);
        }

        Ok(format!(
            "Found {} validation rules for {}:\n\n{}",
            rules.len(),
            object,
            table.render()
        ))
    }
}
