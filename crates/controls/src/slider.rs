//! A single parameter slider: runtime state, labels and input handling

use crate::format::format_scientific;
use crate::transform::{ScaleTransform, SliderRange};
use playground_shared::{
    ParameterUpdate, PlaygroundError, PlaygroundResult, Scale, SliderDefinition,
};

/// Mutable per-slider state, always in real (untransformed) units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub scale: Scale,
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
}

impl SliderState {
    /// Build a state, enforcing `min <= value <= max`, a positive step and
    /// the log-scale domain.
    pub fn validated(
        name: &str,
        scale: Scale,
        min: f64,
        max: f64,
        value: f64,
        step: f64,
    ) -> PlaygroundResult<Self> {
        for (field, number) in [("min", min), ("max", max), ("value", value), ("step", step)] {
            if !number.is_finite() {
                return Err(PlaygroundError::InvalidField {
                    field: field.to_string(),
                    input: number.to_string(),
                });
            }
        }

        if min > max {
            return Err(PlaygroundError::InvalidBounds {
                name: name.to_string(),
                min,
                max,
            });
        }

        if value < min || value > max {
            return Err(PlaygroundError::ValueOutOfRange {
                name: name.to_string(),
                value,
                min,
                max,
            });
        }

        // min is the smallest of the three once the range checks pass
        ScaleTransform::new(scale).check_domain(name, "min", min)?;

        if step <= 0.0 {
            return Err(PlaygroundError::InvalidStep {
                name: name.to_string(),
                step,
            });
        }

        Ok(Self {
            scale,
            min,
            max,
            value,
            step,
        })
    }

    pub fn transform(&self) -> ScaleTransform {
        ScaleTransform::new(self.scale)
    }

    /// Native range attributes
    pub fn range(&self) -> SliderRange {
        self.transform()
            .range(self.min, self.max, self.value, self.step)
    }
}

/// One parameter control with its name and value labels
#[derive(Debug, Clone)]
pub struct SliderWidget {
    definition: SliderDefinition,
    state: SliderState,
    value_label: String,
    decimals: usize,
}

impl SliderWidget {
    pub fn new(definition: SliderDefinition, decimals: usize) -> PlaygroundResult<Self> {
        let state = SliderState::validated(
            &definition.name,
            definition.scale,
            definition.min,
            definition.max,
            definition.initial_value,
            definition.stepsize,
        )?;

        Ok(Self {
            value_label: format_scientific(state.value, decimals),
            definition,
            state,
            decimals,
        })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The definition the slider was built from; settings fields are seeded from it
    pub fn definition(&self) -> &SliderDefinition {
        &self.definition
    }

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn scale(&self) -> Scale {
        self.state.scale
    }

    pub fn value(&self) -> f64 {
        self.state.value
    }

    pub fn range(&self) -> SliderRange {
        self.state.range()
    }

    pub fn name_label(&self) -> &str {
        self.name()
    }

    pub fn value_label(&self) -> &str {
        &self.value_label
    }

    pub fn slider_id(&self) -> String {
        format!("{}-slider", self.name())
    }

    pub fn name_label_id(&self) -> String {
        format!("{}-label", self.name())
    }

    pub fn value_label_id(&self) -> String {
        format!("{}-value-label", self.name())
    }

    /// Handle a native input event at `position` (transformed space).
    ///
    /// Updates the value and its label and returns the update to hand to the
    /// debounced request path.
    pub fn on_input(&mut self, position: f64) -> ParameterUpdate {
        let position = self.range().clamp(position);
        let value = self.state.transform().to_value(position);

        self.state.value = value;
        self.relabel();

        ParameterUpdate::new(self.name(), value)
    }

    /// Replace scale, bounds, step and value with an already validated state
    pub(crate) fn apply_state(&mut self, state: SliderState) -> SliderRange {
        self.state = state;
        self.relabel();
        self.range()
    }

    fn relabel(&mut self) {
        self.value_label = format_scientific(self.state.value, self.decimals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(scale: Scale, min: f64, max: f64, value: f64) -> SliderDefinition {
        SliderDefinition {
            name: "k".to_string(),
            scale,
            min,
            max,
            initial_value: value,
            stepsize: 0.1,
        }
    }

    #[test]
    fn test_construction_sets_labels_and_ids() {
        let slider = SliderWidget::new(definition(Scale::Linear, 0.0, 10.0, 2.5), 2).unwrap();

        assert_eq!(slider.value_label(), "2.50e+0");
        assert_eq!(slider.slider_id(), "k-slider");
        assert_eq!(slider.value_label_id(), "k-value-label");
        assert_eq!(slider.range().value, 2.5);
    }

    #[test]
    fn test_log_slider_operates_in_log_space() {
        let mut slider = SliderWidget::new(definition(Scale::Log, 0.01, 100.0, 1.0), 2).unwrap();
        let range = slider.range();
        assert!((range.min + 2.0).abs() < 1e-12);
        assert!((range.max - 2.0).abs() < 1e-12);
        assert_eq!(range.value, 0.0);

        let update = slider.on_input(1.0);
        assert_eq!(update.param_name, "k");
        assert!((update.param_value - 10.0).abs() < 1e-9);
        assert_eq!(slider.value_label(), "1.00e+1");
    }

    #[test]
    fn test_input_is_clamped_to_range() {
        let mut slider = SliderWidget::new(definition(Scale::Linear, 0.0, 10.0, 5.0), 2).unwrap();
        let update = slider.on_input(42.0);
        assert_eq!(update.param_value, 10.0);
    }

    #[test]
    fn test_invalid_definitions_rejected() {
        assert!(matches!(
            SliderWidget::new(definition(Scale::Linear, 10.0, 1.0, 5.0), 2),
            Err(PlaygroundError::InvalidBounds { .. })
        ));
        assert!(matches!(
            SliderWidget::new(definition(Scale::Linear, 1.0, 10.0, 20.0), 2),
            Err(PlaygroundError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            SliderWidget::new(definition(Scale::Log, -1.0, 10.0, 1.0), 2),
            Err(PlaygroundError::NonPositiveLogBound { .. })
        ));
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut def = definition(Scale::Linear, 0.0, 1.0, 0.5);
        def.stepsize = 0.0;
        assert!(matches!(
            SliderWidget::new(def, 2),
            Err(PlaygroundError::InvalidStep { .. })
        ));
    }
}
