use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending field (`body` when the payload itself is wrong)
    pub field: String,
    /// Machine readable violation kind: `required`, `type`, `range` or `length`
    pub code: String,
    /// Human readable explanation
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Every field violation found in one payload.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("validation failed for {} field(s)", .violations.len())]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn new(mut violations: Vec<FieldViolation>) -> Self {
        violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
        Self { violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// True when `field` has a violation with the given code.
    pub fn has(&self, field: &str, code: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.code == code)
    }
}

/// Pulls typed values out of an untyped payload, remembering every type
/// mismatch instead of stopping at the first one.
///
/// Absent and `null` fields read as `None` without a violation; whether they
/// are required is decided by the draft's `validator` rules.
pub(crate) struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(payload: &'a Value) -> Result<Self, ValidationFailure> {
        match payload {
            Value::Object(fields) => Ok(Self {
                fields,
                violations: Vec::new(),
            }),
            _ => Err(ValidationFailure::new(vec![FieldViolation::new(
                "body",
                "type",
                "expected a JSON object",
            )])),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    fn mismatch(&mut self, field: &str, message: &str) {
        trace!(field, message, "type mismatch");
        self.violations
            .push(FieldViolation::new(field, "type", message));
    }

    pub(crate) fn string(&mut self, field: &str) -> Option<String> {
        match self.present(field)? {
            Value::String(value) => Some(value.clone()),
            _ => {
                self.mismatch(field, "expected a string");
                None
            }
        }
    }

    pub(crate) fn number(&mut self, field: &str) -> Option<f64> {
        match self.present(field)? {
            Value::Number(value) => value.as_f64(),
            _ => {
                self.mismatch(field, "expected a number");
                None
            }
        }
    }

    pub(crate) fn timestamp(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let parsed = match self.present(field)? {
            Value::String(raw) => parse_timestamp(raw),
            _ => None,
        };
        if parsed.is_none() {
            self.mismatch(field, "expected an RFC 3339 timestamp or a YYYY-MM-DD date");
        }
        parsed
    }

    /// Combines the collected type mismatches with the draft's rule
    /// violations. A field that already failed its type check is not reported
    /// again as missing.
    pub(crate) fn finish(
        self,
        rules: Result<(), ValidationErrors>,
    ) -> Result<(), ValidationFailure> {
        let mut violations = self.violations;

        if let Err(errors) = rules {
            for (field, field_errors) in errors.field_errors() {
                let field = field.to_string();
                if violations.iter().any(|v| v.field == field) {
                    continue;
                }
                for error in field_errors {
                    let code = error.code.to_string();
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| default_message(&code).to_string());
                    violations.push(FieldViolation::new(field.clone(), code, message));
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(violations))
        }
    }
}

fn default_message(code: &str) -> &'static str {
    match code {
        "required" => "field required",
        "range" => "value out of range",
        "length" => "invalid length",
        _ => "invalid value",
    }
}

/// Accepts RFC 3339, a naive date-time (taken as UTC) or a plain date
/// (midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
