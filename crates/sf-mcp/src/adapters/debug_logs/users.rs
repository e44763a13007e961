//! Resolving the user a debug log operation is about.

use busbar_sf_rest::{QueryBuilder, SalesforceRestClient};
use serde::Deserialize;
use tracing::debug;

use super::CONTEXT;
use crate::error::ToolError;

const USER_FIELDS: [&str; 4] = ["Id", "Username", "Name", "IsActive"];
const NAME_MATCH_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "IsActive", default)]
    pub is_active: bool,
}

/// Usernames are email-shaped; anything else containing a space is a name.
pub fn looks_like_username(input: &str) -> bool {
    input.contains('@') || !input.contains(' ')
}

fn primary_query(input: &str) -> busbar_sf_rest::Result<QueryBuilder<UserRecord>> {
    let builder = QueryBuilder::new("User")?.select(&USER_FIELDS)?;
    if looks_like_username(input) {
        builder.where_eq("Username", input)
    } else {
        Ok(builder
            .where_like("Name", input)?
            .order_by("LastModifiedDate", false)?
            .limit(NAME_MATCH_LIMIT))
    }
}

fn fallback_query(input: &str) -> busbar_sf_rest::Result<QueryBuilder<UserRecord>> {
    Ok(QueryBuilder::new("User")?
        .select(&USER_FIELDS)?
        .where_like_any(&["Name", "Username"], input)?
        .order_by("LastModifiedDate", false)?
        .limit(NAME_MATCH_LIMIT))
}

async fn run(
    rest: &SalesforceRestClient,
    query: busbar_sf_rest::Result<QueryBuilder<UserRecord>>,
) -> Result<Vec<UserRecord>, ToolError> {
    let query = query.map_err(|err| ToolError::remote(CONTEXT, err))?;
    let result = query
        .execute(rest)
        .await
        .map_err(|err| ToolError::remote(CONTEXT, err))?;
    Ok(result.records)
}

/// Find exactly one user matching `input`.
///
/// The exact lookup runs first; a substring match on name or username is the
/// fallback. No match is `NotFound`, several are `Ambiguous` with the
/// candidates listed.
pub(super) async fn resolve_user(
    rest: &SalesforceRestClient,
    input: &str,
) -> Result<UserRecord, ToolError> {
    let mut users = run(rest, primary_query(input)).await?;
    if users.is_empty() {
        debug!(input, "No direct user match, trying substring search");
        users = run(rest, fallback_query(input)).await?;
    }

    match users.len() {
        0 => Err(ToolError::NotFound(format!(
            "Error: No user found matching '{input}'. \
             Please verify the username or full name and try again."
        ))),
        1 => Ok(users.remove(0)),
        _ => {
            let mut message = format!(
                "Multiple users found matching '{input}'. \
                 Please specify which user by providing the exact username:\n\n"
            );
            for user in &users {
                message.push_str(&format!("- {} ({})\n", user.name, user.username));
            }
            Err(ToolError::Ambiguous(message))
        }
    }
}
