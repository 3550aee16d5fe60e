//! Feature Layout - Centralized Intake Field Definition
//!
//! **This file controls the `/predict` wire schema.**
//!
//! `FEATURE_LAYOUT` lists every key of the request body in the exact order it
//! is serialized. `FeatureVector` must declare its fields in the same order.

use serde::Serialize;

// ============================================================================
// FIELD KINDS
// ============================================================================

/// How an intake field is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Integer literal (numeric inputs and select codes)
    Integer,
    /// Finite decimal literal
    Decimal,
    /// Checkbox, encoded as 0/1
    Flag,
    /// Free text, optional
    Text,
}

impl FieldKind {
    /// Human-readable expectation used in validation messages
    pub fn expectation(&self) -> &'static str {
        match self {
            FieldKind::Integer => "an integer",
            FieldKind::Decimal => "a decimal number",
            FieldKind::Flag => "a checkbox value",
            FieldKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

pub const NAME_FIELD: &str = "Name";

/// Request keys in the exact order they are sent to `/predict`
pub const FEATURE_LAYOUT: &[FieldSpec] = &[
    field("AGE", FieldKind::Integer),
    field("GENDER", FieldKind::Integer),              // 0 male, 1 female, 2 other
    field("SMOKING", FieldKind::Flag),
    field("FINGER_DISCOLORATION", FieldKind::Flag),
    field("MENTAL_STRESS", FieldKind::Flag),
    field("EXPOSURE_TO_POLLUTION", FieldKind::Flag),
    field("LONG_TERM_ILLNESS", FieldKind::Flag),
    field("ENERGY_LEVEL", FieldKind::Integer),
    field("IMMUNE_WEAKNESS", FieldKind::Flag),
    field("BREATHING_ISSUE", FieldKind::Flag),
    field("ALCOHOL_CONSUMPTION", FieldKind::Flag),
    field("THROAT_DISCOMFORT", FieldKind::Flag),
    field("OXYGEN_SATURATION", FieldKind::Decimal),
    field("CHEST_TIGHTNESS", FieldKind::Flag),
    field("FAMILY_HISTORY", FieldKind::Flag),
    field("SMOKING_FAMILY_HISTORY", FieldKind::Flag),
    field("STRESS_IMMUNE", FieldKind::Integer),       // 0 weak, 1 moderate, 2 strong
    field(NAME_FIELD, FieldKind::Text),
];

/// Model inputs (every key except `Name`)
pub const MODEL_FEATURE_COUNT: usize = 17;

// ============================================================================
// LOOKUPS
// ============================================================================

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FEATURE_LAYOUT.iter().find(|spec| spec.name == name)
}

/// Names of the model inputs, in wire order
pub fn model_feature_names() -> impl Iterator<Item = &'static str> {
    FEATURE_LAYOUT
        .iter()
        .filter(|spec| spec.kind != FieldKind::Text)
        .map(|spec| spec.name)
}

/// Is `name` one of the model inputs an attribution may refer to?
pub fn is_model_feature(name: &str) -> bool {
    field_spec(name).is_some_and(|spec| spec.kind != FieldKind::Text)
}
