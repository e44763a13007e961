//! Safety helpers for values interpolated into SOQL and URL paths.
//!
//! Anything that came from a tool caller and ends up inside a SOQL string
//! literal goes through [`soql::escape_string`] (or [`soql::escape_like`]
//! for `LIKE` patterns). Identifiers are checked with the `is_safe_*`
//! predicates before they are spliced into a query or path.
//!
//! ```rust
//! use busbar_sf_client::security::soql;
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM User WHERE Name = '{}'", name);
//! assert_eq!(query, "SELECT Id FROM User WHERE Name = 'O\\'Brien'");
//! ```

/// SOQL escaping and identifier validation.
pub mod soql {
    /// Escape a value for use inside a single-quoted SOQL string literal.
    ///
    /// ```rust
    /// use busbar_sf_client::security::soql;
    ///
    /// assert_eq!(soql::escape_string("O'Brien & Co."), "O\\'Brien & Co.");
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escape a value for use inside a `LIKE` pattern.
    ///
    /// Wildcards in the value are matched literally; callers add their own
    /// `%` around the escaped text.
    ///
    /// ```rust
    /// use busbar_sf_client::security::soql;
    ///
    /// assert_eq!(soql::escape_like("50%_off"), "50\\%\\_off");
    /// ```
    #[must_use]
    pub fn escape_like(value: &str) -> String {
        escape_string(value)
            .chars()
            .fold(String::with_capacity(value.len() + 8), |mut out, ch| {
                match ch {
                    '%' => out.push_str("\\%"),
                    '_' => out.push_str("\\_"),
                    _ => out.push(ch),
                }
                out
            })
    }

    /// A single API name: a letter followed by letters, digits or underscores.
    ///
    /// ```rust
    /// use busbar_sf_client::security::soql;
    ///
    /// assert!(soql::is_safe_field_name("Custom_Field__c"));
    /// assert!(!soql::is_safe_field_name("Bad'; DROP--"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }

    /// A dotted relationship path such as `Account.Owner.Name`.
    #[must_use]
    pub fn is_safe_field_path(path: &str) -> bool {
        path.split('.').all(is_safe_field_name)
    }

    /// SObject names follow the same rules as field names.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }
}

/// URL path helpers.
pub mod url {
    /// Salesforce ids are 15 or 18 alphanumeric characters.
    ///
    /// ```rust
    /// use busbar_sf_client::security::url;
    ///
    /// assert!(url::is_valid_salesforce_id("07L000000000001"));
    /// assert!(!url::is_valid_salesforce_id("07L/../../etc"));
    /// ```
    #[must_use]
    pub fn is_valid_salesforce_id(id: &str) -> bool {
        matches!(id.len(), 15 | 18) && id.chars().all(|c| c.is_ascii_alphanumeric())
    }

    /// Build `sobjects/{sobject}/{id}` after validating both parts.
    #[must_use]
    pub fn sobject_path(sobject: &str, id: &str) -> Option<String> {
        if !super::soql::is_safe_sobject_name(sobject) || !is_valid_salesforce_id(id) {
            return None;
        }
        Some(format!("sobjects/{}/{}", sobject, id))
    }
}

#[cfg(test)]
mod tests {
    mod soql_tests {
        use super::super::soql::*;

        #[test]
        fn test_escape_string_injection_attempts() {
            assert_eq!(
                escape_string("' OR Name LIKE '%"),
                "\\' OR Name LIKE \\'%"
            );
            assert_eq!(escape_string("a\\b"), "a\\\\b");
            assert_eq!(escape_string("line1\nline2\t"), "line1\\nline2\\t");
        }

        #[test]
        fn test_escape_like() {
            assert_eq!(escape_like("Jane_Doe"), "Jane\\_Doe");
            assert_eq!(escape_like("100%"), "100\\%");
            assert_eq!(escape_like("O'Hara"), "O\\'Hara");
        }

        #[test]
        fn test_is_safe_field_name() {
            assert!(is_safe_field_name("Id"));
            assert!(is_safe_field_name("Custom_Field__c"));
            assert!(!is_safe_field_name(""));
            assert!(!is_safe_field_name("1Field"));
            assert!(!is_safe_field_name("_Field"));
            assert!(!is_safe_field_name("Field Name"));
            assert!(!is_safe_field_name("Name'--"));
            assert!(!is_safe_field_name("Account.Name"));
        }

        #[test]
        fn test_is_safe_field_path() {
            assert!(is_safe_field_path("Name"));
            assert!(is_safe_field_path("Account.Name"));
            assert!(is_safe_field_path("Owner__r.Manager.Email"));
            assert!(!is_safe_field_path("Account..Name"));
            assert!(!is_safe_field_path("Account."));
            assert!(!is_safe_field_path("COUNT(Id)"));
        }
    }

    mod url_tests {
        use super::super::url::*;

        #[test]
        fn test_is_valid_salesforce_id() {
            assert!(is_valid_salesforce_id("7tf000000000001"));
            assert!(is_valid_salesforce_id("7tf000000000001AAA"));
            assert!(!is_valid_salesforce_id("7tf00000000001"));
            assert!(!is_valid_salesforce_id("7tf-00000000001"));
            assert!(!is_valid_salesforce_id(""));
        }

        #[test]
        fn test_sobject_path() {
            assert_eq!(
                sobject_path("TraceFlag", "7tf000000000001"),
                Some("sobjects/TraceFlag/7tf000000000001".to_string())
            );
            assert_eq!(sobject_path("Trace Flag", "7tf000000000001"), None);
            assert_eq!(sobject_path("TraceFlag", "../etc"), None);
        }
    }
}
