//! Configuration validation utilities

use crate::{DomConfig, Endpoints, PanelConfig};
use playground_shared::{PlaygroundError, PlaygroundResult};

/// Upper bound on the debounce delay
const MAX_DEBOUNCE_MS: u32 = 10_000;

/// `f64` carries at most 17 significant digits
const MAX_LABEL_DECIMALS: usize = 15;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &PanelConfig) -> PlaygroundResult<()> {
        Self::validate_timing(config)?;
        Self::validate_endpoints(&config.endpoints)?;
        Self::validate_dom(&config.dom)?;
        config.log_level()?;

        if config.label_decimals > MAX_LABEL_DECIMALS {
            return Err(PlaygroundError::invalid_config(
                format!(
                    "Invalid label_decimals: {}. Must be at most {}",
                    config.label_decimals, MAX_LABEL_DECIMALS
                ),
                "label_decimals",
            ));
        }

        Ok(())
    }

    fn validate_timing(config: &PanelConfig) -> PlaygroundResult<()> {
        if config.debounce_ms == 0 || config.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(PlaygroundError::invalid_config(
                format!(
                    "Invalid debounce_ms: {}. Must be between 1 and {}",
                    config.debounce_ms, MAX_DEBOUNCE_MS
                ),
                "debounce_ms",
            ));
        }

        if config.fetch_timeout_ms == 0 {
            return Err(PlaygroundError::invalid_config(
                "fetch_timeout_ms must be positive",
                "fetch_timeout_ms",
            ));
        }

        if config.fetch_timeout_ms < config.debounce_ms {
            log::warn!(
                "fetch_timeout_ms ({}) is shorter than debounce_ms ({})",
                config.fetch_timeout_ms,
                config.debounce_ms
            );
        }

        Ok(())
    }

    fn validate_endpoints(endpoints: &Endpoints) -> PlaygroundResult<()> {
        let routes = [
            ("endpoints.slider_data", &endpoints.slider_data),
            ("endpoints.plot_data", &endpoints.plot_data),
            ("endpoints.initial_data", &endpoints.initial_data),
            ("endpoints.update", &endpoints.update),
        ];

        for (field, path) in routes {
            if !path.starts_with('/') {
                return Err(PlaygroundError::invalid_config(
                    format!("Endpoint must be an absolute path, got {path:?}"),
                    field,
                ));
            }
        }

        Ok(())
    }

    fn validate_dom(dom: &DomConfig) -> PlaygroundResult<()> {
        let ids = [
            ("dom.plot_container", &dom.plot_container),
            ("dom.name_labels", &dom.name_labels),
            ("dom.sliders", &dom.sliders),
            ("dom.value_labels", &dom.value_labels),
            ("dom.settings_buttons", &dom.settings_buttons),
        ];

        for (field, id) in ids {
            if id.trim().is_empty() {
                return Err(PlaygroundError::invalid_config(
                    "Container id cannot be empty",
                    field,
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: PlaygroundError) -> Option<String> {
        match err {
            PlaygroundError::InvalidConfig { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&PanelConfig::default()).is_ok());
    }

    #[test]
    fn test_debounce_bounds() {
        let mut config = PanelConfig::default();
        config.debounce_ms = 0;
        assert_eq!(
            field_of(ConfigValidator::validate(&config).unwrap_err()).as_deref(),
            Some("debounce_ms")
        );

        config.debounce_ms = MAX_DEBOUNCE_MS + 1;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let mut config = PanelConfig::default();
        config.endpoints.update = "update_plot_data".to_string();
        assert_eq!(
            field_of(ConfigValidator::validate(&config).unwrap_err()).as_deref(),
            Some("endpoints.update")
        );
    }

    #[test]
    fn test_empty_container_rejected() {
        let mut config = PanelConfig::default();
        config.dom.sliders = "  ".to_string();
        assert_eq!(
            field_of(ConfigValidator::validate(&config).unwrap_err()).as_deref(),
            Some("dom.sliders")
        );
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = PanelConfig::default();
        config.log_level = "chatty".to_string();
        assert_eq!(
            field_of(ConfigValidator::validate(&config).unwrap_err()).as_deref(),
            Some("log_level")
        );
    }

    #[test]
    fn test_label_decimals_limit() {
        let mut config = PanelConfig::default();
        config.label_decimals = 20;
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
