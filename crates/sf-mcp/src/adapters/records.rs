//! Bounded SOQL queries rendered as Markdown tables.

use busbar_sf_rest::QueryBuilder;
use serde_json::Value;
use tracing::{debug, instrument};

use super::require;
use crate::error::{ToolError, ToolResult};
use crate::format::MarkdownTable;

pub const DEFAULT_QUERY_LIMIT: u32 = 10;
pub const MAX_QUERY_LIMIT: u32 = 2000;

/// Clamp a requested row limit into `1..=MAX_QUERY_LIMIT`.
pub fn clamp_query_limit(limit: Option<i64>) -> u32 {
    match limit {
        Some(n) => n.clamp(1, MAX_QUERY_LIMIT as i64) as u32,
        None => DEFAULT_QUERY_LIMIT,
    }
}

/// Arguments of a record query.
///
/// `fields`, `where_clause` and `order_by` are SOQL fragments passed through
/// verbatim, so field functions like `toLabel(Industry)` reach the org as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub object_name: String,
    pub fields: Vec<String>,
    pub where_clause: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<i64>,
}

impl QueryRequest {
    pub fn new<I, S>(object_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            object_name: object_name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_where(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    pub fn with_order_by(mut self, order: impl Into<String>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the SOQL text.
    pub fn to_soql(&self) -> Result<String, ToolError> {
        require(&self.object_name, "Object name is required")?;

        let fields: Vec<&str> = self
            .fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.is_empty() {
            return Err(ToolError::validation("At least one field must be specified"));
        }

        let invalid = |err: busbar_sf_rest::Error| {
            ToolError::validation(format!("Invalid query for {}: {}", self.object_name, err))
        };

        let mut builder = QueryBuilder::<Value>::new(self.object_name.trim())
            .map_err(invalid)?
            .select_raw(fields.as_slice())
            .limit(clamp_query_limit(self.limit));
        if let Some(clause) = &self.where_clause {
            builder = builder.where_raw(clause);
        }
        if let Some(order) = &self.order_by {
            builder = builder.order_by_raw(order);
        }

        builder.build().map_err(invalid)
    }
}

impl super::SalesforceTools {
    #[instrument(skip(self), fields(object = %request.object_name))]
    pub async fn query_records(&self, request: &QueryRequest) -> ToolResult {
        let soql = request.to_soql()?;
        let context = format!("Error querying {} records", request.object_name);
        debug!(%soql, "Running record query");

        let rest = self.rest(&context).await?;
        let result = rest
            .query::<Value>(&soql)
            .await
            .map_err(|err| ToolError::remote(&context, err))?;

        if result.records.is_empty() {
            return Ok(format!("No records found for query: {soql}"));
        }

        let columns: Vec<&str> = request
            .fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();

        let mut table = MarkdownTable::new(&columns);
        for record in &result.records {
            table.row(columns.iter().map(|column| cell_value(record, column)));
        }

        Ok(format!(
            "Query: {}\n\nFound {} records. Displaying {}.\n\n{}",
            soql,
            result.total_size,
            result.records.len(),
            table.render()
        ))
    }
}

/// Walk a dotted path such as `Owner.Name` through a record.
///
/// A missing or null step renders as an empty cell. Keys are matched exactly
/// first, then ignoring case, since SOQL field names are case-insensitive.
fn cell_value(record: &Value, path: &str) -> String {
    let mut current = record;
    for part in path.split('.') {
        let next = current.get(part).or_else(|| {
            current
                .as_object()?
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(part))
                .map(|(_, value)| value)
        });
        match next {
            Some(value) => current = value,
            None => return String::new(),
        }
    }

    match current {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
