//! Normalization of loosely typed JSON scalars.
//!
//! FRED is inconsistent about numeric fields: the same identifier may arrive as
//! `53`, `"53"` or `53.0` depending on the endpoint. These helpers fold all of
//! them into one representation.

use serde_json::Value;

use crate::{FredError, Result};

/// Coerces a JSON scalar into an integer.
///
/// Accepts integers, integral floats and numeric strings. `null` yields
/// `Ok(None)`.
///
/// # Errors
///
/// Returns [`FredError::Conversion`] for non-integral floats, non-numeric
/// strings, booleans, arrays and objects.
///
/// # Example
///
/// ```
/// use fredtools_types::coerce_int;
/// use serde_json::json;
///
/// assert_eq!(coerce_int("level", &json!("42")).unwrap(), Some(42));
/// assert_eq!(coerce_int("level", &json!(42.0)).unwrap(), Some(42));
/// assert_eq!(coerce_int("level", &json!(null)).unwrap(), None);
/// assert!(coerce_int("level", &json!(42.5)).is_err());
/// ```
pub fn coerce_int(field: &str, value: &Value) -> Result<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(Some(int));
            }
            number
                .as_f64()
                .and_then(integral)
                .map(Some)
                .ok_or_else(|| FredError::conversion(field, value))
        }
        Value::String(text) => parse_int(text.trim())
            .map(Some)
            .ok_or_else(|| FredError::conversion(field, value)),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            Err(FredError::conversion(field, value))
        }
    }
}

/// Looks up `key` in a JSON object and coerces it, treating a missing key as `null`.
///
/// # Errors
///
/// Same as [`coerce_int`].
pub fn coerce_field(object: &Value, key: &str) -> Result<Option<i64>> {
    object
        .get(key)
        .map_or(Ok(None), |value| coerce_int(key, value))
}

/// Renders a JSON scalar as text. Strings are taken verbatim, numbers and
/// booleans through their JSON form, `null` as `None`.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_int(text: &str) -> Option<i64> {
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(integral))
}

#[allow(clippy::cast_possible_truncation)]
fn integral(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_accepts_strings_and_floats() {
        assert_eq!(coerce_int("id", &json!("42")).unwrap(), Some(42));
        assert_eq!(coerce_int("id", &json!(" 5 ")).unwrap(), Some(5));
        assert_eq!(coerce_int("id", &json!(42.0)).unwrap(), Some(42));
        assert_eq!(coerce_int("id", &json!(7)).unwrap(), Some(7));
        assert_eq!(coerce_int("id", &json!("3.0")).unwrap(), Some(3));
        assert_eq!(coerce_int("id", &json!(null)).unwrap(), None);
    }

    #[test]
    fn test_coerce_rejects_invalid_values() {
        assert!(matches!(
            coerce_int("level", &json!("abc")),
            Err(FredError::Conversion { .. })
        ));
        assert!(coerce_int("level", &json!(42.5)).is_err());
        assert!(coerce_int("level", &json!("")).is_err());
        assert!(coerce_int("level", &json!(true)).is_err());
        assert!(coerce_int("level", &json!([1])).is_err());
    }

    #[test]
    fn test_conversion_error_names_field() {
        let err = coerce_int("level", &json!("abc")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("level"));
        assert!(message.contains("abc"));
    }

    #[test]
    fn test_coerce_field_missing_key() {
        let object = json!({ "level": "1" });
        assert_eq!(coerce_field(&object, "level").unwrap(), Some(1));
        assert_eq!(coerce_field(&object, "parent_id").unwrap(), None);
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("3")), Some("3".to_string()));
        assert_eq!(scalar_text(&json!(3)), Some("3".to_string()));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!({})), None);
    }
}
