//! Diff generation for audit logging
//!
//! Summarizes top-level field changes between two entity states.

use serde::Serialize;
use serde_json::Value;

/// Summarize the fields that differ between two serializable states
pub fn diff_entities<T: Serialize>(before: &T, after: &T) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;
    generate_diff(&before, &after)
}

/// Generate a human-readable diff between two JSON values
///
/// Only top-level fields are compared.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if before_val != after_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_field_change() {
        let before = json!({"category": "Food", "amount": 1000});
        let after = json!({"category": "Food", "amount": 1500});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: 1000 -> 1500");
    }

    #[test]
    fn test_null_to_value() {
        let before = json!({"item": null});
        let after = json!({"item": "Groceries"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("item: null -> \"Groceries\""));
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"a": 1, "old": "x"});
        let after = json!({"a": 1, "new": true});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("old: \"x\" -> (removed)"));
        assert!(diff.contains("new: (added) -> true"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"limit": 100});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_non_object_values() {
        assert_eq!(
            generate_diff(&json!("Food"), &json!("Groceries")).unwrap(),
            "\"Food\" -> \"Groceries\""
        );
    }

    #[test]
    fn test_long_multibyte_string_truncation() {
        let long_string = "é".repeat(100);
        let diff = generate_diff(&json!({"d": long_string}), &json!({"d": "short"})).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_diff_entities() {
        #[derive(Serialize)]
        struct Limit {
            limit: i64,
        }
        let diff = diff_entities(&Limit { limit: 1 }, &Limit { limit: 2 }).unwrap();
        assert_eq!(diff, "limit: 1 -> 2");
    }
}
