//! Scalar converters for raw table cells

use serde::{Deserialize, Serialize};

/// Unit suffix used by frequency cells (e.g. "19.961%")
pub const PERCENTAGE_UNIT: char = '%';

const INFINITY_LITERAL: &str = "Infinity";

/// A typed table value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value (NaN when the source was not numeric)
    Number(f64),
    /// Free-text value
    Text(String),
}

impl Value {
    /// Get the numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Get the text value, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// Convert to a display string
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// How a raw cell string becomes a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Converter {
    /// Keep the string as-is
    Identity,
    /// Decimal number
    Number,
    /// Number with a trailing percent sign
    Frequency,
}

impl Converter {
    /// Apply the converter to a raw cell
    pub fn apply(self, raw: &str) -> Value {
        match self {
            Converter::Identity => Value::Text(convert_identity(raw).to_string()),
            Converter::Number => Value::Number(convert_number(raw)),
            Converter::Frequency => Value::Number(convert_frequency(raw)),
        }
    }
}

/// Returns the string unchanged.
pub fn convert_identity(s: &str) -> &str {
    s
}

/// Parses a decimal number.
///
/// Never fails: blank input is `0.0` and anything non-numeric is `NaN`.
/// Only the spelled-out `Infinity` (optionally signed) yields an infinity;
/// `inf`, `nan` and friends are `NaN`. Hex and other radix prefixes are not
/// recognized and also give `NaN`.
pub fn convert_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        Ok(n) if trimmed.trim_start_matches(['+', '-']) == INFINITY_LITERAL => n,
        _ => f64::NAN,
    }
}

/// Parses a number in the format "12.5%".
///
/// Everything from the last percent sign on is dropped. The magnitude is
/// returned as written, no scaling to a fraction happens here.
pub fn convert_frequency(s: &str) -> f64 {
    let number = match s.rfind(PERCENTAGE_UNIT) {
        Some(idx) => &s[..idx],
        None => s,
    };
    convert_number(number)
}
