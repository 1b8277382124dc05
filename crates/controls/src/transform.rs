//! Mapping between a parameter's real value and the slider's native position
//!
//! Under `log` scale the native range input operates in log10 space: its
//! min, max and value attributes are `log10` of the real ones. The step is
//! written untransformed. Log scale is defined only for strictly positive
//! values, for freshly built sliders and for settings edits alike.

use playground_shared::{PlaygroundError, PlaygroundResult, Scale};

/// Native attributes of a range input, in transformed space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
}

impl SliderRange {
    pub fn clamp(&self, position: f64) -> f64 {
        position.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleTransform {
    scale: Scale,
}

impl ScaleTransform {
    pub fn new(scale: Scale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Real value to slider position
    pub fn to_position(&self, value: f64) -> f64 {
        match self.scale {
            Scale::Linear => value,
            Scale::Log => value.log10(),
        }
    }

    /// Slider position to real value
    pub fn to_value(&self, position: f64) -> f64 {
        match self.scale {
            Scale::Linear => position,
            Scale::Log => 10f64.powf(position),
        }
    }

    /// Reject values outside the transform's domain
    pub fn check_domain(&self, name: &str, field: &str, value: f64) -> PlaygroundResult<()> {
        if self.scale == Scale::Log && value <= 0.0 {
            return Err(PlaygroundError::NonPositiveLogBound {
                name: name.to_string(),
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Native attributes for real-space bounds
    pub fn range(&self, min: f64, max: f64, value: f64, step: f64) -> SliderRange {
        SliderRange {
            min: self.to_position(min),
            max: self.to_position(max),
            value: self.to_position(value),
            step,
        }
    }
}
