//! Common error types used across all playground crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all playground operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum PlaygroundError {
    // Data-related errors
    #[error("Data fetch failed: {message}")]
    DataFetch { message: String },

    #[error("Data parse error: {message}")]
    DataParse {
        message: String,
        line: Option<usize>,
    },

    // Slider errors
    #[error("Invalid bounds for {name}: min {min} is greater than max {max}")]
    InvalidBounds { name: String, min: f64, max: f64 },

    #[error("Value {value} for {name} is outside [{min}, {max}]")]
    ValueOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Log scale requires positive values, {name} has {field} = {value}")]
    NonPositiveLogBound {
        name: String,
        field: String,
        value: f64,
    },

    #[error("Invalid step size for {name}: {step}")]
    InvalidStep { name: String, step: f64 },

    #[error("Field {field} is not a number: {input:?}")]
    InvalidField { field: String, input: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    // WASM-specific errors
    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

/// Result type alias for playground operations
pub type PlaygroundResult<T> = Result<T, PlaygroundError>;

impl PlaygroundError {
    pub fn invalid_config(message: impl Into<String>, field: &str) -> Self {
        PlaygroundError::InvalidConfig {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

impl From<serde_json::Error> for PlaygroundError {
    fn from(err: serde_json::Error) -> Self {
        PlaygroundError::DataParse {
            message: err.to_string(),
            line: Some(err.line()),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for PlaygroundError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        PlaygroundError::JsInterop {
            message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<PlaygroundError> for wasm_bindgen::JsValue {
    fn from(err: PlaygroundError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
