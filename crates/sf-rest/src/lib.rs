//! # sf-rest
//!
//! Salesforce REST API client for schema introspection and SOQL queries.
//!
//! ## Features
//!
//! - **Describe Global** - the org's sObject catalog
//! - **Describe SObject** - fields, relationships, picklists and record types,
//!   either typed or as the untouched JSON document
//! - **SOQL Query** - first page or all pages
//! - **Query Builder** - renders SOQL text without touching the network
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_rest::{QueryBuilder, SalesforceRestClient};
//!
//! let client = SalesforceRestClient::new("https://myorg.my.salesforce.com", token)?;
//! let describe = client.describe_sobject("Account").await?;
//!
//! let soql = QueryBuilder::<serde_json::Value>::new("Account")?
//!     .select(&["Name", "Owner.Name"])?
//!     .limit(5)
//!     .build()?;
//! let rows = client.query::<serde_json::Value>(&soql).await?;
//! ```

mod client;
mod describe;
mod error;
mod query_builder;

pub use client::SalesforceRestClient;
pub use describe::{
    ChildRelationship, DescribeGlobalResult, DescribeSObjectResult, FieldDescribe,
    PicklistValue, RecordTypeInfo, SObjectBasicInfo,
};
pub use error::{Error, ErrorKind, Result};
pub use busbar_sf_client::QueryResult;
pub use query_builder::QueryBuilder;

