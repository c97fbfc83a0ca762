//! Helpers for picking records out of FRED response bodies.

use chrono::NaiveDate;
use fredtools_types::{FredError, Result, coerce_int, parse_date, scalar_text};
use serde::Deserialize;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde_json::Value;

/// Returns the array stored under `key`. A missing key or `null` yields an
/// empty slice.
pub(crate) fn records<'a>(body: &'a Value, key: &str) -> Result<&'a [Value]> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(FredError::UpstreamShape(format!(
            "expected `{key}` to be a list, got {other}"
        ))),
    }
}

/// Returns the first record under `key`, or a not-found error.
pub(crate) fn first_record<'a>(
    body: &'a Value,
    key: &str,
    kind: &'static str,
    id: &dyn std::fmt::Display,
) -> Result<&'a Value> {
    records(body, key)?
        .first()
        .ok_or_else(|| FredError::NotFound {
            kind,
            id: id.to_string(),
        })
}

/// Decodes the descriptive fields of a record. Unknown keys are ignored.
pub(crate) fn decode<T: DeserializeOwned>(record: &Value) -> Result<T> {
    Ok(T::deserialize(record)?)
}

/// Reads an integer identifier stored under the first present key.
pub(crate) fn int_id(record: &Value, keys: &[&str], kind: &str) -> Result<i64> {
    for key in keys {
        if let Some(value) = record.get(*key)
            && let Some(id) = coerce_int(key, value)?
        {
            return Ok(id);
        }
    }
    Err(FredError::UpstreamShape(format!("{kind} record has no identifier: {record}")))
}

/// Reads a textual identifier stored under the first present key.
pub(crate) fn text_id(record: &Value, keys: &[&str], kind: &str) -> Result<String> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(scalar_text))
        .find(|id| !id.is_empty())
        .ok_or_else(|| FredError::UpstreamShape(format!("{kind} record has no identifier: {record}")))
}

/// Reads a required string field.
pub(crate) fn required_str<'a>(record: &'a Value, key: &str) -> Result<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| FredError::UpstreamShape(format!("record is missing `{key}`: {record}")))
}

/// Parses a list of dates given either as bare strings or as objects with a
/// `date` key.
pub(crate) fn dates(body: &Value, key: &str) -> Result<Vec<NaiveDate>> {
    records(body, key)?
        .iter()
        .map(|item| match item {
            Value::String(raw) => parse_date(key, raw),
            Value::Object(_) => parse_date(key, required_str(item, "date")?),
            other => Err(FredError::UpstreamShape(format!(
                "expected a date in `{key}`, got {other}"
            ))),
        })
        .collect()
}

/// Deserializes an optional integer that FRED may send as a number or a
/// numeric string.
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_int("integer field", &value).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_missing_key_is_empty() {
        assert!(records(&json!({}), "seriess").unwrap().is_empty());
        assert!(records(&json!({ "seriess": null }), "seriess").unwrap().is_empty());
    }

    #[test]
    fn test_records_rejects_non_list() {
        let err = records(&json!({ "seriess": {} }), "seriess").unwrap_err();
        assert!(matches!(err, FredError::UpstreamShape(_)));
    }

    #[test]
    fn test_first_record_not_found() {
        let err = first_record(&json!({ "seriess": [] }), "seriess", "series", &"GDP").unwrap_err();
        assert_eq!(err.to_string(), "No series found with id GDP");
    }

    #[test]
    fn test_ids() {
        let record = json!({ "id": "53", "series_id": "GDP" });
        assert_eq!(int_id(&record, &["id"], "release").unwrap(), 53);
        assert_eq!(text_id(&record, &["series_id", "id"], "series").unwrap(), "GDP");
        assert!(int_id(&json!({}), &["id"], "release").is_err());
        assert!(text_id(&json!({ "id": "" }), &["id"], "series").is_err());
    }

    #[test]
    fn test_dates_accepts_strings_and_objects() {
        let body = json!({
            "release_dates": ["2020-01-01", { "release_id": 53, "date": "2020-01-15" }]
        });
        let parsed = dates(&body, "release_dates").unwrap();
        assert_eq!(
            parsed,
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            ]
        );
    }

    #[test]
    fn test_dates_rejects_garbage() {
        assert!(dates(&json!({ "d": [1] }), "d").is_err());
        assert!(dates(&json!({ "d": ["01/02/2020"] }), "d").is_err());
    }

    #[test]
    fn test_lenient_int() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "lenient_int")]
            n: Option<i64>,
        }
        let parse = |v: Value| serde_json::from_value::<Probe>(v).map(|p| p.n);
        assert_eq!(parse(json!({ "n": "7" })).unwrap(), Some(7));
        assert_eq!(parse(json!({ "n": 7.0 })).unwrap(), Some(7));
        assert_eq!(parse(json!({ "n": null })).unwrap(), None);
        assert_eq!(parse(json!({})).unwrap(), None);
        assert!(parse(json!({ "n": "x" })).is_err());
    }
}
