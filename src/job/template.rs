//! # Template Substitution
//!
//! Replaces `{{name}}` placeholders in text elements with values from
//! the job's variable map. A placeholder whose name is missing from the
//! map passes through verbatim, so the sender sees the unresolved name
//! on paper instead of getting a silent blank.

use std::collections::HashMap;

/// Variable names the fleet's server is known to send. Used to flag
/// likely sender typos; substitution itself accepts any name the job's
/// map provides.
pub const KNOWN_VARIABLES: &[&str] = &[
    "business_name",
    "business_address",
    "business_street",
    "business_unit",
    "business_city",
    "business_state",
    "business_country",
    "business_postal_code",
    "business_phone",
    "order_id",
    "customer_name",
    "customer_phone",
    "total_amount",
    "order_time",
    "selected_screen",
    "show_time",
    "seat_number",
];

/// Whether a variable name is on the fleet's standard list.
pub fn is_known(name: &str) -> bool {
    KNOWN_VARIABLES.contains(&name)
}

/// Substitute placeholders in `text` from the variable map.
pub fn replace_variables(text: &str, variables: &HashMap<String, String>) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    let mut result = text.to_string();
    for (name, value) in variables {
        let placeholder = format!("{{{{{name}}}}}");
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, value);
        }
    }
    result
}
