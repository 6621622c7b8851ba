//! Quantization levels accepted by model creation.

use super::wire::{Param, WireValue};
use crate::{Error, ErrorContext};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantizationType {
    Q2K,
    Q3KL,
    Q3KM,
    Q3KS,
    Q40,
    Q41,
    Q4KM,
    Q4KS,
    Q50,
    Q51,
    Q5KM,
    Q5KS,
    Q6K,
    Q80,
}

impl QuantizationType {
    pub const ALL: [QuantizationType; 14] = [
        QuantizationType::Q2K,
        QuantizationType::Q3KL,
        QuantizationType::Q3KM,
        QuantizationType::Q3KS,
        QuantizationType::Q40,
        QuantizationType::Q41,
        QuantizationType::Q4KM,
        QuantizationType::Q4KS,
        QuantizationType::Q50,
        QuantizationType::Q51,
        QuantizationType::Q5KM,
        QuantizationType::Q5KS,
        QuantizationType::Q6K,
        QuantizationType::Q80,
    ];

    /// Wire code, case-sensitive (`q4_K_M`, not `Q4_K_M`).
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantizationType::Q2K => "q2_K",
            QuantizationType::Q3KL => "q3_K_L",
            QuantizationType::Q3KM => "q3_K_M",
            QuantizationType::Q3KS => "q3_K_S",
            QuantizationType::Q40 => "q4_0",
            QuantizationType::Q41 => "q4_1",
            QuantizationType::Q4KM => "q4_K_M",
            QuantizationType::Q4KS => "q4_K_S",
            QuantizationType::Q50 => "q5_0",
            QuantizationType::Q51 => "q5_1",
            QuantizationType::Q5KM => "q5_K_M",
            QuantizationType::Q5KS => "q5_K_S",
            QuantizationType::Q6K => "q6_K",
            QuantizationType::Q80 => "q8_0",
        }
    }
}

impl fmt::Display for QuantizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantizationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuantizationType::ALL
            .iter()
            .copied()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = QuantizationType::ALL.iter().map(|q| q.as_str()).collect();
                Error::validation_with_context(
                    format!("unknown quantization type '{}'", s),
                    ErrorContext::new()
                        .with_field_path("quantize")
                        .with_details(format!("expected one of: {}", allowed.join(", "))),
                )
            })
    }
}

impl WireValue for QuantizationType {
    fn to_wire_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

impl From<QuantizationType> for Param<QuantizationType> {
    fn from(q: QuantizationType) -> Self {
        Param::Structured(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_parses_back() {
        for q in QuantizationType::ALL {
            assert_eq!(q.as_str().parse::<QuantizationType>().unwrap(), q);
        }
    }

    #[test]
    fn out_of_set_value_is_rejected() {
        let err = "bogus".parse::<QuantizationType>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("quantize")
        );
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!("Q4_K_M".parse::<QuantizationType>().is_err());
        assert_eq!(
            "q4_K_M".parse::<QuantizationType>().unwrap(),
            QuantizationType::Q4KM
        );
    }
}
