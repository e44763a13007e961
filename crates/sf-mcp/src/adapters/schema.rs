//! Object describe tools.

use busbar_sf_rest::{DescribeSObjectResult, FieldDescribe};
use tracing::instrument;

use super::require;
use crate::error::{ToolError, ToolResult};
use crate::format::{capitalize, or_na, yes_no, MarkdownTable};

fn describe_error(context: String, object: &str, err: busbar_sf_rest::Error) -> ToolError {
    if err.is_not_found() {
        ToolError::NotFound(format!("{context}: Object '{object}' not found."))
    } else {
        ToolError::remote(context, err)
    }
}

impl super::SalesforceTools {
    async fn describe(&self, object: &str, context: String) -> Result<DescribeSObjectResult, ToolError> {
        require(object, "Object name is required")?;
        let rest = self.rest(&context).await?;
        rest.describe_sobject(object)
            .await
            .map_err(|err| describe_error(context, object, err))
    }

    /// Markdown report of an object's properties, fields, relationships,
    /// picklists, child relationships and record types.
    #[instrument(skip(self))]
    pub async fn describe_object(&self, object: &str) -> ToolResult {
        let describe = self
            .describe(object, format!("Error describing object {object}"))
            .await?;
        Ok(render_describe(&describe))
    }

    /// The describe document exactly as Salesforce returned it, pretty-printed.
    #[instrument(skip(self))]
    pub async fn describe_object_raw(&self, object: &str) -> ToolResult {
        let context = format!("Error retrieving raw JSON for {object}");
        require(object, "Object name is required")?;

        let rest = self.rest(&context).await?;
        let document = rest
            .describe_sobject_raw(object)
            .await
            .map_err(|err| describe_error(context.clone(), object, err))?;

        serde_json::to_string_pretty(&document).map_err(|err| ToolError::remote(context, err))
    }

    #[instrument(skip(self))]
    pub async fn relationship_fields(&self, object: &str) -> ToolResult {
        let describe = self
            .describe(object, format!("Error describing relationship fields for {object}"))
            .await?;
        Ok(render_relationships(&describe))
    }

    /// Fields whose type equals `field_type` (case-insensitive), or every
    /// field when no type is given. Rows are sorted by API name.
    #[instrument(skip(self))]
    pub async fn fields_by_type(&self, object: &str, field_type: Option<&str>) -> ToolResult {
        let describe = self
            .describe(object, format!("Error getting fields for {object}"))
            .await?;

        let field_type = field_type.map(str::trim).filter(|t| !t.is_empty());
        let mut fields: Vec<&FieldDescribe> = describe
            .fields
            .iter()
            .filter(|f| field_type.is_none_or(|t| f.field_type.eq_ignore_ascii_case(t)))
            .collect();

        if fields.is_empty() {
            return Ok(format!(
                "No fields of type '{}' found on object '{}'.",
                field_type.unwrap_or_default(),
                object
            ));
        }
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        let heading = match field_type {
            Some(t) => capitalize(t),
            None => "All".to_string(),
        };

        let mut table = MarkdownTable::new([
            "API Name",
            "Label",
            "Type",
            "Required",
            "Updateable",
            "Custom",
            "Description",
        ]);
        for field in fields {
            table.row([
                field.name.as_str(),
                field.label.as_str(),
                field.field_type.as_str(),
                yes_no(!field.nillable),
                yes_no(field.updateable),
                yes_no(field.custom),
                field.inline_help_text.as_deref().unwrap_or_default(),
            ]);
        }

        Ok(format!(
            "# {} Fields on {} ({})\n\n{}",
            heading,
            describe.label,
            describe.name,
            table.render()
        ))
    }

    #[instrument(skip(self))]
    pub async fn picklist_values(&self, object: &str, field: &str) -> ToolResult {
        require(field, "Field name is required")?;
        let describe = self
            .describe(object, format!("Error getting picklist values for {object}.{field}"))
            .await?;

        let Some(found) = describe.field(field) else {
            return Err(ToolError::NotFound(format!(
                "Field '{field}' not found on object '{object}'."
            )));
        };
        if !found.is_picklist() {
            return Err(ToolError::NotFound(format!(
                "Field '{}' is not a picklist field (type: {}).",
                field, found.field_type
            )));
        }

        let mut table = MarkdownTable::new(["Value", "Label", "Default", "Active"]);
        for value in &found.picklist_values {
            table.row([
                value.value.as_str(),
                value.label.as_deref().unwrap_or(&value.value),
                yes_no(value.default_value),
                yes_no(value.active),
            ]);
        }

        Ok(format!(
            "Picklist values for {}.{} ({}):\n\n{}",
            object,
            found.name,
            found.label,
            table.render()
        ))
    }
}

fn render_describe(describe: &DescribeSObjectResult) -> String {
    let mut out = format!("## {} ({})\n\n", describe.label, describe.name);

    let kind = if describe.custom { "Custom Object" } else { "Standard Object" };
    out.push_str(&format!("**Type:** {kind}\n"));
    out.push_str(&format!("**API Name:** {}\n", describe.name));
    out.push_str(&format!("**Label:** {}\n", describe.label));
    out.push_str(&format!(
        "**Plural Label:** {}\n",
        or_na(describe.label_plural.as_deref())
    ));
    out.push_str(&format!(
        "**Key Prefix:** {}\n",
        or_na(describe.key_prefix.as_deref())
    ));
    out.push_str(&format!("**Createable:** {}\n", describe.createable));
    out.push_str(&format!("**Updateable:** {}\n", describe.updateable));
    out.push_str(&format!("**Deletable:** {}\n\n", describe.deletable));

    let mut fields =
        MarkdownTable::new(["API Name", "Label", "Type", "Required", "Unique", "External ID"]);
    for field in &describe.fields {
        fields.row([
            field.name.as_str(),
            field.label.as_str(),
            field.field_type.as_str(),
            yes_no(!field.nillable),
            yes_no(field.unique),
            yes_no(field.external_id),
        ]);
    }
    out.push_str("## Fields\n\n");
    out.push_str(&fields.render());

    let mut references = MarkdownTable::new(["API Name", "Related To", "Relationship Name"]);
    for field in describe.reference_fields() {
        references.row([
            field.name.clone(),
            field.reference_to.join(", "),
            or_na(field.relationship_name.as_deref()).to_string(),
        ]);
    }
    if !references.is_empty() {
        out.push_str("\n## Relationship Fields\n\n");
        out.push_str(&references.render());
    }

    let picklists: Vec<&FieldDescribe> = describe.picklist_fields().collect();
    if !picklists.is_empty() {
        out.push_str("\n## Picklist Fields\n\n");
        for field in picklists {
            out.push_str(&format!("### {} ({})\n\n", field.label, field.name));
            let mut values = MarkdownTable::new(["Value", "Label", "Default", "Active"]);
            for value in &field.picklist_values {
                values.row([
                    value.value.as_str(),
                    value.label.as_deref().unwrap_or(&value.value),
                    yes_no(value.default_value),
                    yes_no(value.active),
                ]);
            }
            out.push_str(&values.render());
            out.push('\n');
        }
    }

    if !describe.child_relationships.is_empty() {
        let mut children =
            MarkdownTable::new(["Child Object", "Relationship Name", "Field", "Cascade Delete"]);
        for child in &describe.child_relationships {
            children.row([
                child.child_sobject.as_str(),
                or_na(child.relationship_name.as_deref()),
                child.field.as_str(),
                yes_no(child.cascade_delete),
            ]);
        }
        out.push_str("\n## Child Relationships\n\n");
        out.push_str(&children.render());
    }

    if !describe.record_type_infos.is_empty() {
        let mut record_types = MarkdownTable::new([
            "Record Type ID",
            "Name",
            "Developer Name",
            "Default",
            "Active",
        ]);
        for info in &describe.record_type_infos {
            record_types.row([
                or_na(info.record_type_id.as_deref()),
                or_na(info.name.as_deref()),
                or_na(info.developer_name.as_deref()),
                yes_no(info.default_record_type_mapping),
                yes_no(info.active),
            ]);
        }
        out.push_str("\n## Record Types\n\n");
        out.push_str(&record_types.render());
    }

    out
}

fn render_relationships(describe: &DescribeSObjectResult) -> String {
    let mut out = format!(
        "# Relationship Fields for {} ({})\n\n",
        describe.label, describe.name
    );

    let mut parents = MarkdownTable::new([
        "API Name",
        "Field Label",
        "Related To",
        "Relationship Name",
        "Type",
    ]);
    for field in describe.reference_fields() {
        let kind = if field.is_master_detail() { "Master-Detail" } else { "Lookup" };
        parents.row([
            field.name.clone(),
            field.label.clone(),
            field.reference_to.join(", "),
            or_na(field.relationship_name.as_deref()).to_string(),
            kind.to_string(),
        ]);
    }

    if parents.is_empty() {
        out.push_str("No parent relationship fields found.\n\n");
    } else {
        out.push_str("## Lookup/Master-Detail Fields (Parent Relationships)\n\n");
        out.push_str(&parents.render());
    }

    if describe.child_relationships.is_empty() {
        out.push_str("\nNo child relationships found.\n");
    } else {
        let mut children = MarkdownTable::new([
            "Child Object",
            "Relationship Name",
            "Field Name",
            "Cascade Delete",
        ]);
        for child in &describe.child_relationships {
            children.row([
                child.child_sobject.as_str(),
                or_na(child.relationship_name.as_deref()),
                child.field.as_str(),
                yes_no(child.cascade_delete),
            ]);
        }
        out.push_str("\n## Child Relationships\n\n");
        out.push_str(&children.render());
    }

    out
}
