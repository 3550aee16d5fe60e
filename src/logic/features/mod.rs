//! Features Module - Intake Encoding
//!
//! Turns the untyped intake form into the fixed-schema vector the
//! prediction service expects.

pub mod encoder;
pub mod layout;
pub mod vector;


// Re-export common types
pub use encoder::{encode, FormValue, RawFormInput};
pub use layout::{FieldKind, FieldSpec, FEATURE_LAYOUT, MODEL_FEATURE_COUNT};
pub use vector::FeatureVector;
