//! Intake Encoder - raw form input to `FeatureVector`
//!
//! Pure function. Collects every field problem before failing so the form
//! can highlight all of them at once.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::layout::{field_spec, FieldKind, NAME_FIELD};
use super::vector::FeatureVector;
use crate::error::{FieldIssue, FieldProblem, ValidationError};

// ============================================================================
// RAW FORM INPUT
// ============================================================================

/// One form control value: text inputs/selects give strings, checkboxes booleans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Checked(bool),
    Text(String),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Checked(value)
    }
}

/// Untyped, possibly partial form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFormInput {
    fields: HashMap<String, FormValue>,
}

impl RawFormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FormValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FormValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for RawFormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ============================================================================
// ENCODER
// ============================================================================

/// Encode a form submission. No IO, same input → same output.
pub fn encode(raw: &RawFormInput) -> Result<FeatureVector, ValidationError> {
    for key in raw.fields.keys() {
        if field_spec(key).is_none() {
            tracing::debug!("Ignoring unknown intake field: {}", key);
        }
    }

    let mut fields = FieldReader { raw, issues: Vec::new() };

    let vector = FeatureVector {
        age: fields.integer("AGE"),
        gender: fields.integer("GENDER"),
        smoking: fields.flag("SMOKING"),
        finger_discoloration: fields.flag("FINGER_DISCOLORATION"),
        mental_stress: fields.flag("MENTAL_STRESS"),
        exposure_to_pollution: fields.flag("EXPOSURE_TO_POLLUTION"),
        long_term_illness: fields.flag("LONG_TERM_ILLNESS"),
        energy_level: fields.integer("ENERGY_LEVEL"),
        immune_weakness: fields.flag("IMMUNE_WEAKNESS"),
        breathing_issue: fields.flag("BREATHING_ISSUE"),
        alcohol_consumption: fields.flag("ALCOHOL_CONSUMPTION"),
        throat_discomfort: fields.flag("THROAT_DISCOMFORT"),
        oxygen_saturation: fields.decimal("OXYGEN_SATURATION"),
        chest_tightness: fields.flag("CHEST_TIGHTNESS"),
        family_history: fields.flag("FAMILY_HISTORY"),
        smoking_family_history: fields.flag("SMOKING_FAMILY_HISTORY"),
        stress_immune: fields.integer("STRESS_IMMUNE"),
        name: fields.text(NAME_FIELD),
    };

    if fields.issues.is_empty() {
        Ok(vector)
    } else {
        // Fields are read in wire order, so issues already are
        let issues = fields.issues;
        tracing::debug!("Intake rejected: {} field issue(s)", issues.len());
        Err(ValidationError { issues })
    }
}

/// Reads typed values, recording an issue (and a placeholder) on failure
struct FieldReader<'a> {
    raw: &'a RawFormInput,
    issues: Vec<FieldIssue>,
}

impl FieldReader<'_> {
    fn integer(&mut self, field: &'static str) -> i64 {
        self.numeric(field, FieldKind::Integer, |s| s.parse::<i64>().ok())
            .unwrap_or_default()
    }

    fn decimal(&mut self, field: &'static str) -> f64 {
        self.numeric(field, FieldKind::Decimal, |s| {
            s.parse::<f64>().ok().filter(|v| v.is_finite())
        })
        .unwrap_or_default()
    }

    fn numeric<T>(
        &mut self,
        field: &'static str,
        kind: FieldKind,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.raw;
        match raw.get(field) {
            None => self.missing(field),
            Some(FormValue::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return self.missing(field);
                }
                let parsed = parse(trimmed);
                if parsed.is_none() {
                    self.not_coercible(field, kind, text.clone());
                }
                parsed
            }
            Some(FormValue::Checked(checked)) => {
                self.not_coercible(field, kind, checked.to_string());
                None
            }
        }
    }

    fn flag(&mut self, field: &'static str) -> u8 {
        let raw = self.raw;
        match raw.get(field) {
            // Unchecked boxes may be left out of the submission entirely
            None => 0,
            Some(FormValue::Checked(checked)) => u8::from(*checked),
            Some(FormValue::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => 1,
                "" | "0" | "false" | "off" | "no" => 0,
                _ => {
                    self.not_coercible(field, FieldKind::Flag, text.clone());
                    0
                }
            },
        }
    }

    fn text(&mut self, field: &'static str) -> String {
        let raw = self.raw;
        match raw.get(field) {
            None => String::new(),
            Some(FormValue::Text(text)) => text.clone(),
            Some(FormValue::Checked(checked)) => {
                self.not_coercible(field, FieldKind::Text, checked.to_string());
                String::new()
            }
        }
    }

    fn missing<T>(&mut self, field: &'static str) -> Option<T> {
        self.issues.push(FieldIssue { field, problem: FieldProblem::Missing });
        None
    }

    fn not_coercible(&mut self, field: &'static str, kind: FieldKind, found: String) {
        self.issues.push(FieldIssue {
            field,
            problem: FieldProblem::NotCoercible { expected: kind.expectation(), found },
        });
    }
}
