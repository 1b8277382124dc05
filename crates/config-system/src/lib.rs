//! Configuration system for the playground control panel
//! Holds endpoint paths, DOM container ids, debounce timing and label formatting

use playground_shared::{PlaygroundError, PlaygroundResult};
use serde::{Deserialize, Serialize};

pub mod validation;

pub use validation::ConfigValidator;

/// Server routes consumed by the panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    pub slider_data: String,
    pub plot_data: String,
    /// Legacy single-trace bootstrap, tried when `plot_data` fails
    pub initial_data: String,
    pub update: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            slider_data: "/serve_slider_data".to_string(),
            plot_data: "/serve_plot_data".to_string(),
            initial_data: "/send_initial_data".to_string(),
            update: "/update_plot_data".to_string(),
        }
    }
}

/// Ids of the page elements the panel renders into
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DomConfig {
    pub plot_container: String,
    pub name_labels: String,
    pub sliders: String,
    pub value_labels: String,
    pub settings_buttons: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            plot_container: "plot-container".to_string(),
            name_labels: "name-labels".to_string(),
            sliders: "sliders".to_string(),
            value_labels: "value-labels".to_string(),
            settings_buttons: "settings-buttons".to_string(),
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    pub endpoints: Endpoints,
    pub dom: DomConfig,
    /// Quiet period before a slider drag turns into a request
    pub debounce_ms: u32,
    /// Fractional digits of the scientific-notation value labels
    pub label_decimals: usize,
    pub fetch_timeout_ms: u32,
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            dom: DomConfig::default(),
            debounce_ms: 300,
            label_decimals: 2,
            fetch_timeout_ms: 30_000,
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> PlaygroundResult<Self> {
        let config: PanelConfig = serde_json::from_str(json)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    pub fn log_level(&self) -> PlaygroundResult<log::Level> {
        self.log_level.parse().map_err(|_| {
            PlaygroundError::invalid_config(
                format!("Unknown log level: {}", self.log_level),
                "log_level",
            )
        })
    }
}
