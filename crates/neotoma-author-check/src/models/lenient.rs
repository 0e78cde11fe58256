//! Lenient deserialization helpers for upstream and on-disk JSON.
//!
//! Neotoma reports publication IDs as integers, older verdict files may hold
//! them as strings, and either source may send `null` where a string belongs.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Canonical form of a publication ID.
///
/// Integral values (`12`, `"12"`, `" 012 "`, `12.0`) collapse to their integer
/// string so that string and numeric IDs compare equal. Anything else is trimmed.
#[must_use]
pub fn normalize_publication_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return n.to_string();
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
            return (f as i64).to_string();
        }
    }
    trimmed.to_string()
}

/// Extract a normalized publication ID from an arbitrary JSON value.
///
/// Returns `None` for null, empty strings, and non-scalar values.
#[must_use]
pub fn publication_id_from_value(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => normalize_publication_id(s),
        Value::Number(n) => normalize_publication_id(&n.to_string()),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

/// Deserialize an optional publication ID from a string or number.
pub fn optional_publication_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(publication_id_from_value))
}

/// Deserialize a publication ID from a string or number; null or blank reads as empty.
pub fn publication_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_publication_id(deserializer)?.unwrap_or_default())
}

/// Treat `null` as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize free text, accepting `null` (empty) and non-string JSON (its JSON text).
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_integral_forms() {
        assert_eq!(normalize_publication_id("12"), "12");
        assert_eq!(normalize_publication_id(" 012 "), "12");
        assert_eq!(normalize_publication_id("12.0"), "12");
        assert_eq!(normalize_publication_id("-4"), "-4");
    }

    #[test]
    fn test_normalize_keeps_non_numeric() {
        assert_eq!(normalize_publication_id(" abc "), "abc");
        assert_eq!(normalize_publication_id("12.5"), "12.5");
        assert_eq!(normalize_publication_id("NaN"), "NaN");
    }

    #[test]
    fn test_value_forms_compare_equal() {
        assert_eq!(publication_id_from_value(&json!(12)), Some("12".to_string()));
        assert_eq!(publication_id_from_value(&json!("12")), Some("12".to_string()));
        assert_eq!(publication_id_from_value(&json!(12.0)), Some("12".to_string()));
    }

    #[test]
    fn test_value_rejects_empty_and_composite() {
        assert_eq!(publication_id_from_value(&json!(null)), None);
        assert_eq!(publication_id_from_value(&json!("  ")), None);
        assert_eq!(publication_id_from_value(&json!([1])), None);
        assert_eq!(publication_id_from_value(&json!({"id": 1})), None);
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "publication_id")]
        id: String,
    }

    #[test]
    fn test_publication_id_blank_reads_empty() {
        let parse = |v: Value| serde_json::from_value::<Row>(v).unwrap().id;
        assert_eq!(parse(json!({"id": 7})), "7");
        assert_eq!(parse(json!({"id": " "})), "");
        assert_eq!(parse(json!({"id": null})), "");
        assert_eq!(parse(json!({})), "");
    }
}
