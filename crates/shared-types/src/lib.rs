//! Shared types for the Model Playground control panel
//!
//! This crate contains the wire types exchanged with the playground server
//! and the slider state model used by the controls and wasm-bridge crates.

use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::{PlaygroundError, PlaygroundResult};

/// Number of slider steps used when the server generates a definition
pub const DEFAULT_STEP_COUNT: u32 = 100;

/// Slider scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    /// The other scale, as cycled by the settings toggle button
    pub fn toggled(self) -> Self {
        match self {
            Scale::Linear => Scale::Log,
            Scale::Log => Scale::Linear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Log => "log",
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of one parameter slider, as served by `/serve_slider_data`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliderDefinition {
    pub name: String,
    #[serde(default)]
    pub scale: Scale,
    pub min: f64,
    pub max: f64,
    pub initial_value: f64,
    pub stepsize: f64,
}

impl SliderDefinition {
    /// Linear definition spanning `min..=max` in the server's default step count
    pub fn with_default_steps(
        name: impl Into<String>,
        min: f64,
        max: f64,
        initial_value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            scale: Scale::Linear,
            min,
            max,
            initial_value,
            stepsize: (max - min) / (DEFAULT_STEP_COUNT - 1) as f64,
        }
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }
}

/// Per-trace legend visibility flag
///
/// Plotly stores either a boolean or the string `"legendonly"` in a trace's
/// `visible` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TraceVisibility {
    Flag(bool),
    State(String),
}

impl TraceVisibility {
    pub const LEGEND_ONLY: &'static str = "legendonly";

    pub fn legend_only() -> Self {
        TraceVisibility::State(Self::LEGEND_ONLY.to_string())
    }

    /// True for explicit legend states that must survive a parameter update
    pub fn is_legend_state(&self) -> bool {
        matches!(self, TraceVisibility::State(_))
    }
}

/// Ordered visibility flags captured from the chart before an update
pub type VisibilitySnapshot = Vec<Option<TraceVisibility>>;

/// One plotted series. Everything but `visible` is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Trace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<TraceVisibility>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Traces plus layout, as returned by `/serve_plot_data` and `/update_plot_data`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlotPayload {
    pub traces: Vec<Trace>,
    #[serde(default)]
    pub layout: serde_json::Value,
}

impl PlotPayload {
    /// Wrap the single trace served by the legacy `/send_initial_data` route
    pub fn from_initial_trace(trace: Trace) -> Self {
        Self {
            traces: vec![trace],
            layout: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Body of `POST /update_plot_data`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterUpdate {
    pub param_name: String,
    pub param_value: f64,
}

impl ParameterUpdate {
    pub fn new(param_name: impl Into<String>, param_value: f64) -> Self {
        Self {
            param_name: param_name.into(),
            param_value,
        }
    }
}
