//! Structured SOQL builder.
//!
//! Renders `SELECT .. FROM .. [WHERE ..] [ORDER BY ..] [LIMIT n]` text without
//! touching the network, so every query the server issues can be asserted
//! in a plain unit test.
//!
//! Values passed to `where_eq`, `where_like` and friends are escaped.
//! `select_raw`, `where_raw` and `order_by_raw` take caller-written SOQL
//! fragments verbatim.
//!
//! # Example
//!
//! ```rust,ignore
//! use busbar_sf_rest::QueryBuilder;
//!
//! let users: Vec<User> = QueryBuilder::new("User")?
//!     .select(&["Id", "Username", "Name", "IsActive"])?
//!     .where_like("Name", user_input)?
//!     .order_by("LastModifiedDate", false)?
//!     .limit(5)
//!     .execute(&client)
//!     .await?
//!     .records;
//! ```

use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::{Error, ErrorKind, QueryResult, Result, SalesforceRestClient};
use busbar_sf_client::security::soql;

/// Safe SOQL query builder.
///
/// Generic over the record type `T` returned by [`QueryBuilder::execute`].
#[derive(Debug, Clone)]
pub struct QueryBuilder<T> {
    sobject: String,
    fields: Vec<String>,
    conditions: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u32>,
    _phantom: PhantomData<T>,
}

fn invalid_field(field: &str) -> Error {
    Error::new(ErrorKind::Salesforce {
        error_code: "INVALID_FIELD".to_string(),
        message: format!("Invalid field name: {}", field),
    })
}

fn checked_field(field: &str) -> Result<&str> {
    if soql::is_safe_field_path(field) {
        Ok(field)
    } else {
        Err(invalid_field(field))
    }
}

impl<T: DeserializeOwned> QueryBuilder<T> {
    /// Create a new query builder for the given SObject.
    pub fn new(sobject: impl AsRef<str>) -> Result<Self> {
        let sobject = sobject.as_ref();

        if !soql::is_safe_sobject_name(sobject) {
            return Err(Error::new(ErrorKind::Salesforce {
                error_code: "INVALID_SOBJECT".to_string(),
                message: format!("Invalid SObject name: {}", sobject),
            }));
        }

        Ok(Self {
            sobject: sobject.to_string(),
            fields: Vec::new(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            _phantom: PhantomData,
        })
    }

    /// Select fields to retrieve. Dotted relationship paths are allowed.
    pub fn select(mut self, fields: &[impl AsRef<str>]) -> Result<Self> {
        for field in fields {
            let field = checked_field(field.as_ref().trim())?;
            self.fields.push(field.to_string());
        }
        Ok(self)
    }

    /// Select caller-written field expressions such as `toLabel(Industry)`.
    ///
    /// **WARNING**: the text is NOT validated. Blank entries are ignored.
    pub fn select_raw(mut self, fields: &[impl AsRef<str>]) -> Self {
        self.fields.extend(
            fields
                .iter()
                .map(|field| field.as_ref().trim())
                .filter(|field| !field.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// `field = 'value'`, with the value escaped.
    pub fn where_eq(mut self, field: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let field = checked_field(field.as_ref())?;
        self.conditions
            .push(format!("{} = '{}'", field, soql::escape_string(value.as_ref())));
        Ok(self)
    }

    /// `field > value` for literals that must stay unquoted, such as datetimes.
    ///
    /// The value must be a SOQL literal produced by the caller, not user input.
    pub fn where_gt_literal(mut self, field: impl AsRef<str>, literal: impl AsRef<str>) -> Result<Self> {
        let field = checked_field(field.as_ref())?;
        self.conditions.push(format!("{} > {}", field, literal.as_ref()));
        Ok(self)
    }

    /// Substring match: `field LIKE '%value%'` with wildcards in the value escaped.
    pub fn where_like(mut self, field: impl AsRef<str>, pattern: impl AsRef<str>) -> Result<Self> {
        let field = checked_field(field.as_ref())?;
        self.conditions
            .push(format!("{} LIKE '%{}%'", field, soql::escape_like(pattern.as_ref())));
        Ok(self)
    }

    /// Substring match on any of `fields`, OR-combined into one condition.
    pub fn where_like_any(mut self, fields: &[&str], pattern: impl AsRef<str>) -> Result<Self> {
        let escaped = soql::escape_like(pattern.as_ref());
        let clauses = fields
            .iter()
            .map(|field| Ok(format!("{} LIKE '%{}%'", checked_field(field)?, escaped)))
            .collect::<Result<Vec<_>>>()?;

        match clauses.len() {
            0 => {}
            1 => self.conditions.extend(clauses),
            _ => self.conditions.push(format!("({})", clauses.join(" OR "))),
        }
        Ok(self)
    }

    /// Append a raw WHERE condition.
    ///
    /// **WARNING**: the text is NOT escaped. Blank text is ignored.
    pub fn where_raw(mut self, condition: impl AsRef<str>) -> Self {
        let condition = condition.as_ref().trim();
        if !condition.is_empty() {
            self.conditions.push(condition.to_string());
        }
        self
    }

    /// Add an ORDER BY term on a validated field.
    pub fn order_by(mut self, field: impl AsRef<str>, ascending: bool) -> Result<Self> {
        let field = checked_field(field.as_ref())?;
        let direction = if ascending { "ASC" } else { "DESC" };
        self.order_by.push(format!("{} {}", field, direction));
        Ok(self)
    }

    /// Append a raw ORDER BY term such as `Name ASC NULLS LAST`.
    ///
    /// **WARNING**: the text is NOT escaped. Blank text is ignored.
    pub fn order_by_raw(mut self, order: impl AsRef<str>) -> Self {
        let order = order.as_ref().trim();
        if !order.is_empty() {
            self.order_by.push(order.to_string());
        }
        self
    }

    /// Set LIMIT clause.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the SOQL text.
    ///
    /// Returns an error if no fields were selected.
    pub fn build(&self) -> Result<String> {
        if self.fields.is_empty() {
            return Err(Error::new(ErrorKind::Salesforce {
                error_code: "NO_FIELDS".to_string(),
                message: "No fields selected for query".to_string(),
            }));
        }

        let mut query = format!("SELECT {} FROM {}", self.fields.join(", "), self.sobject);

        if !self.conditions.is_empty() {
            query.push_str(&format!(" WHERE {}", self.conditions.join(" AND ")));
        }

        if !self.order_by.is_empty() {
            query.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(query)
    }

    /// Execute the query and return the first page of results.
    pub async fn execute(&self, client: &SalesforceRestClient) -> Result<QueryResult<T>> {
        let query = self.build()?;
        client.query(&query).await
    }
}
