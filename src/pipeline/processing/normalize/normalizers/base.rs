use crate::error::Result;
use crate::types::{NormalizedRecipe, RawRecipe, SourceKind};
use serde_json::Value;

/// Base trait for source-specific normalizers
pub trait SourceNormalizer: Send + Sync {
    /// Map one raw record into the flat schema. A record from another source
    /// is a `SourceMismatch` error.
    fn normalize(&self, raw: &RawRecipe) -> Result<NormalizedRecipe>;

    /// The source this normalizer handles
    fn source_kind(&self) -> SourceKind;
}

pub struct NormalizerUtils;

impl NormalizerUtils {
    /// Lenient text-to-number coercion. Thousands separators are tolerated;
    /// anything else that does not parse to a finite number yields `None`.
    pub fn coerce_number(text: &str) -> Option<f64> {
        let cleaned = text.trim().replace(',', "");
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Numeric JSON field, or 0 when absent, null or not a number
    pub fn json_number_or_zero(value: Option<&Value>) -> f64 {
        let number = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => Self::coerce_number(s),
            _ => None,
        };
        Self::finite_or_zero(number)
    }

    pub fn finite_or_zero(value: Option<f64>) -> f64 {
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}
