// ABOUTME: Lenient decoding of loosely typed JSON request fields
// ABOUTME: Numbers and text are accepted in whatever scalar form the client sends

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Numeric reading of a JSON value.
///
/// Numbers pass through, numeric strings are parsed after trimming and
/// booleans become 1 or 0. Anything else (null, blank or non-numeric text,
/// arrays, objects) has no numeric value.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text reading of a JSON value, as SQLite stores it in a TEXT column.
///
/// Numbers use their JSON spelling, booleans become "1" or "0", and arrays
/// or objects are kept as JSON text. Only null has no text.
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// `deserialize_with` adapter for [`number_from_value`]
pub fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

/// `deserialize_with` adapter for [`text_from_value`]
pub fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(150), Some(150.0))]
    #[case(json!(150.0), Some(150.0))]
    #[case(json!(99.5), Some(99.5))]
    #[case(json!("5000"), Some(5000.0))]
    #[case(json!(" 12.5 "), Some(12.5))]
    #[case(json!(true), Some(1.0))]
    #[case(json!(false), Some(0.0))]
    #[case(json!(""), None)]
    #[case(json!("lots"), None)]
    #[case(json!("NaN"), None)]
    #[case(json!(null), None)]
    #[case(json!([1]), None)]
    fn test_number_from_value(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(number_from_value(&value), expected);
    }

    #[rstest]
    #[case(json!("IDEA-7"), Some("IDEA-7"))]
    #[case(json!(42), Some("42"))]
    #[case(json!(2.5), Some("2.5"))]
    #[case(json!(true), Some("1"))]
    #[case(json!(""), Some(""))]
    #[case(json!(["a"]), Some("[\"a\"]"))]
    #[case(json!(null), None)]
    fn test_text_from_value(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(text_from_value(&value).as_deref(), expected);
    }

    #[test]
    fn test_adapters_default_when_missing() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "loose_number")]
            budget: Option<f64>,
            #[serde(default, deserialize_with = "loose_text")]
            comments: Option<String>,
        }

        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.budget, None);
        assert_eq!(body.comments, None);

        let body: Body = serde_json::from_str(r#"{"budget": "750", "comments": 3}"#).unwrap();
        assert_eq!(body.budget, Some(750.0));
        assert_eq!(body.comments.as_deref(), Some("3"));
    }
}
