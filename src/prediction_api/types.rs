use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

/// Countries and suggested ranges served by `GET /metadata`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "present_ranges")]
    pub ranges: BTreeMap<String, RangeInfo>,
    /// Development status values known to the backend; informational only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_values: Vec<String>,
}

/// Observed bounds of a numeric column.
///
/// A `null` bound reads as 0 and a missing or non-numeric one as NaN, so one
/// odd entry never fails the whole metadata document.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RangeInfo {
    pub min: f64,
    pub max: f64,
}

impl From<Value> for RangeInfo {
    fn from(value: Value) -> Self {
        Self {
            min: bound(value.get("min")),
            max: bound(value.get("max")),
        }
    }
}

fn bound(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::Null) => 0.0,
        Some(Value::String(text)) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Value of one payload column.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Value of a select control.
    Text(String),
    /// Parsed numeric input. NaN is kept and goes over the wire as `null`.
    Number(f64),
    /// Empty numeric input.
    Null,
}

impl FeatureValue {
    /// Whether the value counts as "filled in": empty text, zero, NaN and
    /// null do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Null => false,
        }
    }
}

/// Column-name to value record sent to `POST /predict`.
///
/// Keys keep their first insertion position; inserting an existing key
/// replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeaturePayload {
    entries: Vec<(String, FeatureValue)>,
}

impl FeaturePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: FeatureValue) {
        let column = column.into();
        match self.entries.iter_mut().find(|(key, _)| *key == column) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value)
    }

    /// Whether `column` is present with a truthy value.
    pub fn has_value(&self, column: &str) -> bool {
        self.get(column).is_some_and(FeatureValue::is_truthy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl Serialize for FeaturePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Body of `POST /predict`.
#[derive(Clone, Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub features: &'a FeaturePayload,
}

/// The three model outcomes returned by `POST /predict`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub regression: Option<RegressionOutcome>,
    #[serde(default)]
    pub knn: Option<ClassificationOutcome>,
    #[serde(default)]
    pub mlp: Option<ClassificationOutcome>,
}

/// Linear regression outcome.
///
/// Decoded leniently from any JSON value so a malformed sub-result only
/// marks this model as failed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RegressionOutcome {
    pub ok: bool,
    pub life_expectancy: Option<f64>,
    pub error: Option<String>,
}

/// Classifier outcome (KNN or MLP), decoded as leniently as the regression.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ClassificationOutcome {
    pub ok: bool,
    pub category: Option<String>,
    pub error: Option<String>,
}

impl From<Value> for RegressionOutcome {
    fn from(value: Value) -> Self {
        Self {
            ok: value.get("ok").is_some_and(is_truthy_json),
            life_expectancy: value.get("life_expectancy").and_then(Value::as_f64),
            error: value.get("error").and_then(display_text),
        }
    }
}

impl From<Value> for ClassificationOutcome {
    fn from(value: Value) -> Self {
        Self {
            ok: value.get("ok").is_some_and(is_truthy_json),
            category: value.get("category").and_then(display_text),
            error: value.get("error").and_then(display_text),
        }
    }
}

fn is_truthy_json(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text shown for a scalar field; `null` shows nothing.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

impl PredictionResult {
    /// Predicted life expectancy, when the regression succeeded.
    pub fn life_expectancy(&self) -> Option<f64> {
        self.regression
            .as_ref()
            .filter(|outcome| outcome.ok)
            .and_then(|outcome| outcome.life_expectancy)
    }

    /// KNN category, when the classifier succeeded.
    pub fn knn_category(&self) -> Option<&str> {
        successful_category(self.knn.as_ref())
    }

    /// MLP category, when the classifier succeeded.
    pub fn mlp_category(&self) -> Option<&str> {
        successful_category(self.mlp.as_ref())
    }
}

fn successful_category(outcome: Option<&ClassificationOutcome>) -> Option<&str> {
    outcome
        .filter(|outcome| outcome.ok)
        .map(|outcome| outcome.category.as_deref().unwrap_or(""))
}

/// Range map without its empty entries (`null`, `false`, `0`, `""`).
fn present_ranges<'de, D>(deserializer: D) -> Result<BTreeMap<String, RangeInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter(|(_, info)| is_truthy_json(info))
        .map(|(column, info)| (column, RangeInfo::from(info)))
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_missing_and_null_fields_default_to_empty() {
        let meta: Metadata = serde_json::from_str(r#"{"countries": null}"#).unwrap();
        assert!(meta.countries.is_empty());
        assert!(meta.ranges.is_empty());
        assert!(meta.status_values.is_empty());
    }

    #[test]
    fn metadata_parses_backend_shape() {
        let meta: Metadata = serde_json::from_str(
            r#"{
                "countries": ["Chile", "Argentina"],
                "status_values": ["Developed", "Developing"],
                "ranges": {"GDP": {"min": 1.68, "max": 119172.74}}
            }"#,
        )
        .unwrap();
        assert_eq!(meta.countries, vec!["Chile", "Argentina"]);
        assert_eq!(
            meta.ranges["GDP"],
            RangeInfo {
                min: 1.68,
                max: 119172.74
            }
        );
    }

    #[test]
    fn payload_serializes_in_insertion_order_with_nan_as_null() {
        let mut payload = FeaturePayload::new();
        payload.insert("Country", FeatureValue::Text("Chile".into()));
        payload.insert("GDP", FeatureValue::Null);
        payload.insert("Alcohol", FeatureValue::Number(f64::NAN));
        payload.insert("Year", FeatureValue::Number(2025.0));
        payload.insert("Country", FeatureValue::Text("Peru".into()));

        let body = serde_json::to_string(&PredictRequest {
            features: &payload,
        })
        .unwrap();
        assert_eq!(
            body,
            r#"{"features":{"Country":"Peru","GDP":null,"Alcohol":null,"Year":2025.0}}"#
        );
    }

    #[test]
    fn truthiness_matches_form_semantics() {
        assert!(!FeatureValue::Null.is_truthy());
        assert!(!FeatureValue::Text(String::new()).is_truthy());
        assert!(!FeatureValue::Number(0.0).is_truthy());
        assert!(!FeatureValue::Number(f64::NAN).is_truthy());
        assert!(FeatureValue::Number(-1.5).is_truthy());
        assert!(FeatureValue::Text("Developed".into()).is_truthy());
    }

    #[test]
    fn prediction_accessors_respect_ok_flags() {
        let result: PredictionResult = serde_json::from_str(
            r#"{
                "regression": {"ok": true, "life_expectancy": 72.345},
                "knn": {"ok": false, "error": "Modelo no disponible"},
                "mlp": {"ok": true, "category": "Bueno"}
            }"#,
        )
        .unwrap();
        assert_eq!(result.life_expectancy(), Some(72.345));
        assert_eq!(result.knn_category(), None);
        assert_eq!(result.mlp_category(), Some("Bueno"));
    }

    #[test]
    fn missing_or_null_sub_results_are_not_ok() {
        let result: PredictionResult =
            serde_json::from_str(r#"{"regression": null, "knn": {"ok": null}}"#).unwrap();
        assert_eq!(result.life_expectancy(), None);
        assert_eq!(result.knn_category(), None);
        assert_eq!(result.mlp_category(), None);
    }

    #[test]
    fn malformed_sub_result_only_fails_that_model() {
        let result: PredictionResult = serde_json::from_str(
            r#"{
                "regression": {"ok": true, "life_expectancy": 70},
                "knn": "down",
                "mlp": {"ok": true, "category": "Malo"}
            }"#,
        )
        .unwrap();
        assert_eq!(result.life_expectancy(), Some(70.0));
        assert_eq!(result.knn_category(), None);
        assert_eq!(result.mlp_category(), Some("Malo"));
    }

    #[test]
    fn ok_flag_and_category_follow_loose_typing() {
        let result: PredictionResult = serde_json::from_str(
            r#"{
                "regression": {"ok": 0, "life_expectancy": 70},
                "knn": {"ok": 1, "category": 3},
                "mlp": {"ok": "yes", "category": null}
            }"#,
        )
        .unwrap();
        assert_eq!(result.life_expectancy(), None);
        assert_eq!(result.knn_category(), Some("3"));
        assert_eq!(result.mlp_category(), Some(""));
    }

    #[test]
    fn odd_range_entries_do_not_fail_metadata() {
        let meta: Metadata = serde_json::from_str(
            r#"{
                "countries": ["Chile"],
                "ranges": {
                    "GDP": {"min": null},
                    "Year": {"min": 2000, "max": 2015},
                    "BMI": null
                }
            }"#,
        )
        .unwrap();
        assert_eq!(meta.countries, vec!["Chile"]);
        let gdp = meta.ranges["GDP"];
        assert_eq!(gdp.min, 0.0);
        assert!(gdp.max.is_nan());
        assert_eq!(meta.ranges["Year"], RangeInfo { min: 2000.0, max: 2015.0 });
        assert!(!meta.ranges.contains_key("BMI"));
    }
}
