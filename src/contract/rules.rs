//! Per-parameter validation rules.
//!
//! Rules are plain data so catalogs stay inspectable and printable. Values
//! arrive as JSON since request parameters come from JSON bodies or files.

use crate::Result;
use crate::diagnostics;

use anyhow::Context;
use regex::Regex;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone)]
pub enum ParameterValidator {
    /// Non-blank string, non-empty array/object, or any number/bool.
    NonEmpty,
    /// Integer > 0, given as a JSON number or a numeric string.
    PositiveInteger,
    /// String (or number rendered as a string) matching the regex.
    Pattern(Regex),
    /// Integer within `min..=max`.
    Range { min: i64, max: i64 },
}

impl ParameterValidator {
    pub fn pattern(re: &str) -> Result<Self> {
        let compiled = Regex::new(re)
            .with_context(|| diagnostics::error_message(format!("bad rule pattern {}", re)))?;
        Ok(Self::Pattern(compiled))
    }

    pub fn check(&self, value: &Value) -> bool {
        match self {
            ParameterValidator::NonEmpty => match value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                Value::Array(a) => !a.is_empty(),
                Value::Object(o) => !o.is_empty(),
                Value::Bool(_) | Value::Number(_) => true,
            },
            ParameterValidator::PositiveInteger => as_integer(value).is_some_and(|n| n > 0),
            ParameterValidator::Pattern(re) => match value {
                Value::String(s) => re.is_match(s),
                Value::Number(n) => re.is_match(&n.to_string()),
                _ => false,
            },
            ParameterValidator::Range { min, max } => {
                as_integer(value).is_some_and(|n| (*min..=*max).contains(&n))
            }
        }
    }
}

impl fmt::Display for ParameterValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValidator::NonEmpty => write!(f, "non-empty"),
            ParameterValidator::PositiveInteger => write!(f, "positive integer"),
            ParameterValidator::Pattern(re) => write!(f, "matches /{}/", re.as_str()),
            ParameterValidator::Range { min, max } => write!(f, "integer in {}..={}", min, max),
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
