//! Describe operations and types.
//!
//! Typed views over the Salesforce describe API. Only the properties the
//! reports need are modelled; everything else in the payload is ignored
//! here and remains available through
//! [`SalesforceRestClient::describe_sobject_raw`](crate::SalesforceRestClient::describe_sobject_raw).

use serde::{Deserialize, Serialize};

// ============================================================================
// Describe Global Types
// ============================================================================

/// Result of the describeGlobal operation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DescribeGlobalResult {
    #[serde(default)]
    pub encoding: Option<String>,

    #[serde(rename = "maxBatchSize", default)]
    pub max_batch_size: Option<u32>,

    /// Every sObject visible to the session user, in catalog order.
    pub sobjects: Vec<SObjectBasicInfo>,
}

/// Basic information about an SObject from describeGlobal.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SObjectBasicInfo {
    pub name: String,
    pub label: String,
    #[serde(rename = "labelPlural", default)]
    pub label_plural: Option<String>,
    #[serde(rename = "keyPrefix", default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub queryable: bool,
}

impl SObjectBasicInfo {
    /// True when the API name or label contains `term`, ignoring case.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.label.to_lowercase().contains(&term)
    }
}

// ============================================================================
// Describe SObject Types
// ============================================================================

/// SObject describe result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DescribeSObjectResult {
    // === Identity ===
    pub name: String,
    pub label: String,
    #[serde(rename = "labelPlural", default)]
    pub label_plural: Option<String>,
    #[serde(rename = "keyPrefix", default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,

    // === Capabilities (CRUD) ===
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub queryable: bool,

    // === Relationships ===
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
    #[serde(rename = "childRelationships", default)]
    pub child_relationships: Vec<ChildRelationship>,

    // === Record Types ===
    #[serde(rename = "recordTypeInfos", default)]
    pub record_type_infos: Vec<RecordTypeInfo>,
}

impl DescribeSObjectResult {
    /// Look up a field by API name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldDescribe> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Reference fields that point at one or more parent objects.
    pub fn reference_fields(&self) -> impl Iterator<Item = &FieldDescribe> {
        self.fields
            .iter()
            .filter(|f| f.field_type == "reference" && !f.reference_to.is_empty())
    }

    /// Picklist and multi-select picklist fields that carry values.
    pub fn picklist_fields(&self) -> impl Iterator<Item = &FieldDescribe> {
        self.fields
            .iter()
            .filter(|f| f.is_picklist() && !f.picklist_values.is_empty())
    }
}

/// Child relationship metadata for an SObject.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChildRelationship {
    #[serde(rename = "childSObject")]
    pub child_sobject: String,
    pub field: String,
    #[serde(rename = "relationshipName", default)]
    pub relationship_name: Option<String>,
    #[serde(rename = "cascadeDelete", default)]
    pub cascade_delete: bool,
}

/// Record type information for an SObject.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordTypeInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "recordTypeId", default)]
    pub record_type_id: Option<String>,
    #[serde(rename = "developerName", default)]
    pub developer_name: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub available: bool,
    #[serde(rename = "defaultRecordTypeMapping", default)]
    pub default_record_type_mapping: bool,
}

/// Field metadata from an SObject describe.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldDescribe {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default = "default_true")]
    pub nillable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(rename = "externalId", default)]
    pub external_id: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(rename = "inlineHelpText", default)]
    pub inline_help_text: Option<String>,
    #[serde(rename = "referenceTo", default)]
    pub reference_to: Vec<String>,
    #[serde(rename = "relationshipName", default)]
    pub relationship_name: Option<String>,
    #[serde(rename = "picklistValues", default)]
    pub picklist_values: Vec<PicklistValue>,
}

impl FieldDescribe {
    pub fn is_picklist(&self) -> bool {
        matches!(self.field_type.as_str(), "picklist" | "multipicklist")
    }

    /// A reference field is required exactly when it is master-detail.
    pub fn is_master_detail(&self) -> bool {
        !self.nillable
    }
}

fn default_true() -> bool {
    true
}

/// Picklist value.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PicklistValue {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(rename = "defaultValue", default)]
    pub default_value: bool,
}
