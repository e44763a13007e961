//! Guidance prompts, one per tool family.

use serde_json::{json, Value};

pub struct Prompt {
    pub name: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

pub static PROMPTS: [Prompt; 9] = [
    Prompt {
        name: "search_objects_prompt",
        description: "Find objects by name, label or business area",
        text: "I can look up objects in your org for you, standard or custom.\n\n\
               Ask about a domain (\"objects related to Accounts\"), a business function \
               (\"objects for customer service\") or a naming pattern (\"custom objects ending in Invoice\").\n\n\
               For example:\n\
               - \"Find objects related to orders or products\"\n\
               - \"Which custom objects does this org have?\"\n\
               - \"What objects might hold customer information?\"\n\n\
               Which objects are you after?",
    },
    Prompt {
        name: "query_records_prompt",
        description: "Retrieve records with filters, sorting and limits",
        text: "I can pull records out of your org and show them as a table.\n\n\
               Tell me the object, the fields you care about, and any filter or sort order.\n\n\
               For example:\n\
               - \"The 5 most recently created accounts\"\n\
               - \"Opportunities over $100,000 closing this month\"\n\
               - \"Contacts whose title contains Director or VP\"\n\
               - \"High priority cases open for more than 3 days\"\n\n\
               What data would you like to see?",
    },
    Prompt {
        name: "describe_object_prompt",
        description: "Explore an object's schema",
        text: "I can explain how any object is built: its fields and their types, which \
               fields are required, its relationships, picklist options, or the complete \
               describe document as raw JSON.\n\n\
               For example:\n\
               - \"Tell me about the Lead object\"\n\
               - \"What fields does Opportunity have?\"\n\
               - \"Give me the raw JSON schema for Contact\"\n\n\
               Which object should we look at?",
    },
    Prompt {
        name: "picklist_values_prompt",
        description: "List the options of a picklist field",
        text: "I can list every option of a picklist field, including which one is the \
               default and which are inactive.\n\n\
               For example:\n\
               - \"What Status values can a Case have?\"\n\
               - \"Show the Industry options on Account\"\n\
               - \"Which Stage values exist for Opportunity?\"\n\n\
               Which object and field?",
    },
    Prompt {
        name: "relationship_fields_prompt",
        description: "Understand how objects relate to each other",
        text: "I can map out an object's relationships: the lookup and master-detail \
               fields pointing to parents, and the child objects pointing back at it.\n\n\
               For example:\n\
               - \"Show all relationships of Contact\"\n\
               - \"How is Case connected to other objects?\"\n\
               - \"Which master-detail fields does Invoice__c have?\"\n\n\
               Which object's relationships should I map?",
    },
    Prompt {
        name: "validation_rules_prompt",
        description: "Review the validation rules on an object",
        text: "I can list the validation rules defined on an object, whether each is \
               active, the message users see and the field it is shown on.\n\n\
               For example:\n\
               - \"What validation rules exist on Opportunity?\"\n\
               - \"Which rules can stop a Lead from saving?\"\n\n\
               Which object's rules would you like to review?",
    },
    Prompt {
        name: "cross_object_search_prompt",
        description: "Search for a value across several objects",
        text: "I can look for a term across several objects by running one query per \
               object and combining what comes back.\n\n\
               For example:\n\
               - \"Find 'cloud' in Accounts and Opportunities\"\n\
               - \"Look for 'Smith & Co' across accounts, contacts and leads\"\n\
               - \"Which recent records mention 'quarterly review'?\"\n\n\
               What should I search for, and where?",
    },
    Prompt {
        name: "field_type_exploration_prompt",
        description: "Find fields of a particular data type",
        text: "I can list the fields of a given type on an object, such as text, \
               picklist, date, currency, reference or formula fields.\n\n\
               For example:\n\
               - \"All picklist fields on Lead\"\n\
               - \"Which Opportunity fields are dates?\"\n\
               - \"Lookup fields on Case\"\n\n\
               Which object and field type?",
    },
    Prompt {
        name: "debug_logs_prompt",
        description: "Turn Apex debug logging on or off and read the logs",
        text: "I can help you troubleshoot with Apex debug logs. I can switch logging on \
               for a user at a chosen level (NONE, ERROR, WARN, INFO, DEBUG, FINE, FINER \
               or FINEST), list their recent logs, show the full content of one log, and \
               switch logging off again when you are done.\n\n\
               For example:\n\
               - \"Enable DEBUG logs for admin@example.com\"\n\
               - \"Turn on FINEST logging for Jane Smith for 60 minutes\"\n\
               - \"Show the latest logs for admin@example.com\"\n\
               - \"Disable debug logging for admin@example.com\"\n\n\
               What would you like to do?",
    },
];

/// The `prompts/list` result.
pub fn list_prompts() -> Value {
    let prompts: Vec<Value> = PROMPTS
        .iter()
        .map(|p| json!({ "name": p.name, "description": p.description, "arguments": [] }))
        .collect();
    json!({ "prompts": prompts })
}

/// The `prompts/get` result for `name`.
pub fn get_prompt(name: &str) -> Option<Value> {
    let prompt = PROMPTS.iter().find(|p| p.name == name)?;
    Some(json!({
        "description": prompt.description,
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": prompt.text }
        }]
    }))
}
