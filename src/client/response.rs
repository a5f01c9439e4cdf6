//! Prediction service response model and its normalization.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::utils::format_number;

/// Raw prediction as returned by the service (a score or a label).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PredictionValue(pub Value);

impl fmt::Display for PredictionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            Value::Number(number) => match (number.as_i64(), number.as_u64(), number.as_f64()) {
                (Some(int), _, _) => write!(f, "{int}"),
                (_, Some(uint), _) => write!(f, "{uint}"),
                (_, _, Some(float)) => f.write_str(&format_number(float)),
                _ => write!(f, "{number}"),
            },
            other => write!(f, "{other}"),
        }
    }
}

/// Which of the three recognised outcomes a response represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseOutcome<'a> {
    Error(&'a str),
    Prediction(&'a PredictionValue),
    Unavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResponse {
    pub fn predicted(value: impl Into<Value>) -> Self {
        Self {
            prediction: Some(PredictionValue(value.into())),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            prediction: None,
            error: Some(message.into()),
        }
    }

    /// An error takes precedence over a prediction; neither is `Unavailable`.
    pub fn outcome(&self) -> ResponseOutcome<'_> {
        match (&self.error, &self.prediction) {
            (Some(error), _) => ResponseOutcome::Error(error),
            (None, Some(prediction)) => ResponseOutcome::Prediction(prediction),
            (None, None) => ResponseOutcome::Unavailable,
        }
    }

    /// Parses a response body. Empty bodies and non-object JSON carry neither
    /// field.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        Self {
            prediction: object.get("prediction").cloned().map(PredictionValue),
            error: object.get("error").and_then(error_text),
        }
    }

    /// Normalizes an HTTP exchange into a single response shape.
    ///
    /// A non-success status always yields an error: the body's `error` field
    /// when it has one, a status-derived message otherwise.
    pub fn from_http(status: u16, body: &str) -> Self {
        let parsed = Self::from_body(body);
        if !(200..300).contains(&status) {
            let message = parsed
                .ok()
                .and_then(|response| response.error)
                .unwrap_or_else(|| format!("HTTP error! Status: {status}"));
            return Self::failure(message);
        }
        parsed.unwrap_or_else(|err| Self::failure(format!("Invalid response body: {err}")))
    }
}

/// Text of an `error` field, ignoring empty and falsy values.
fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_the_three_outcomes() {
        let error = PredictionResponse::from_http(500, r#"{"error":"model unavailable"}"#);
        assert_eq!(error.outcome(), ResponseOutcome::Error("model unavailable"));

        let prediction = PredictionResponse::from_http(200, r#"{"prediction":0.73}"#);
        assert!(matches!(prediction.outcome(), ResponseOutcome::Prediction(value) if value.to_string() == "0.73"));

        let empty = PredictionResponse::from_http(200, "  \n");
        assert_eq!(empty.outcome(), ResponseOutcome::Unavailable);
    }

    #[test]
    fn non_success_without_error_field_uses_status() {
        let response = PredictionResponse::from_http(502, "<html>bad gateway</html>");
        assert_eq!(response.error.as_deref(), Some("HTTP error! Status: 502"));

        let response = PredictionResponse::from_http(404, r#"{"prediction":1}"#);
        assert_eq!(response.error.as_deref(), Some("HTTP error! Status: 404"));
    }

    #[test]
    fn unparsable_success_body_is_an_error() {
        let response = PredictionResponse::from_http(200, "not json");
        assert!(response
            .error
            .as_deref()
            .is_some_and(|message| message.starts_with("Invalid response body")));
    }

    #[test]
    fn falsy_error_fields_are_ignored() {
        let response = PredictionResponse::from_value(&json!({"error": "", "prediction": "Churned"}));
        assert_eq!(response.error, None);
        assert_eq!(response.prediction.unwrap().to_string(), "Churned");

        let response = PredictionResponse::from_value(&json!([1, 2]));
        assert_eq!(response.outcome(), ResponseOutcome::Unavailable);
    }

    #[test]
    fn whole_float_predictions_render_without_fraction() {
        assert_eq!(PredictionValue(json!(1.0)).to_string(), "1");
        assert_eq!(PredictionValue(json!(7)).to_string(), "7");
        assert_eq!(PredictionValue(Value::Null).to_string(), "null");
    }
}
