//! Per-slider settings form: scale toggle, bounds, step and value editing

use crate::panels::{PanelDispatcher, PanelId};
use crate::slider::{SliderState, SliderWidget};
use crate::transform::SliderRange;
use playground_shared::{PlaygroundError, PlaygroundResult, Scale};

/// Editable text fields of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Min,
    Max,
    Stepsize,
    InitialValue,
}

impl SettingsField {
    pub const ALL: [SettingsField; 4] = [
        SettingsField::Min,
        SettingsField::Max,
        SettingsField::Stepsize,
        SettingsField::InitialValue,
    ];

    /// Definition key the field edits
    pub fn key(&self) -> &'static str {
        match self {
            SettingsField::Min => "min",
            SettingsField::Max => "max",
            SettingsField::Stepsize => "stepsize",
            SettingsField::InitialValue => "initial_value",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Min => "min",
            SettingsField::Max => "max",
            SettingsField::Stepsize => "stepsize",
            SettingsField::InitialValue => "initial value",
        }
    }

    /// CSS class of the field's input element
    pub fn css_class(&self) -> String {
        format!("{}-field", self.key())
    }
}

/// Settings menu state for one slider
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    id: PanelId,
    scale: Scale,
    min: String,
    max: String,
    stepsize: String,
    initial_value: String,
}

impl SettingsPanel {
    /// Seed the form from the slider's definition
    pub fn new(widget: &SliderWidget) -> Self {
        let definition = widget.definition();
        Self {
            id: PanelId::new(),
            scale: definition.scale,
            min: definition.min.to_string(),
            max: definition.max.to_string(),
            stepsize: definition.stepsize.to_string(),
            initial_value: definition.initial_value.to_string(),
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Scale currently shown on the toggle button
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Cycle the toggle button between `log` and `linear`
    pub fn toggle_scale(&mut self) -> Scale {
        self.scale = self.scale.toggled();
        self.scale
    }

    pub fn field(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Min => &self.min,
            SettingsField::Max => &self.max,
            SettingsField::Stepsize => &self.stepsize,
            SettingsField::InitialValue => &self.initial_value,
        }
    }

    pub fn set_field(&mut self, field: SettingsField, text: impl Into<String>) {
        let text = text.into();
        match field {
            SettingsField::Min => self.min = text,
            SettingsField::Max => self.max = text,
            SettingsField::Stepsize => self.stepsize = text,
            SettingsField::InitialValue => self.initial_value = text,
        }
    }

    /// Validate the form and apply it to `widget`.
    ///
    /// On success the widget takes the new scale, bounds, step and value, and
    /// the panel is hidden. On failure nothing changes and the panel stays open.
    pub fn submit(
        &self,
        widget: &mut SliderWidget,
        dispatcher: &mut PanelDispatcher,
    ) -> PlaygroundResult<SliderRange> {
        let state = match self.parse_state(widget.name()) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Invalid values for {}: {e}", widget.name());
                return Err(e);
            }
        };

        let range = widget.apply_state(state);
        dispatcher.hide(self.id);

        log::debug!(
            "Applied settings to {}: scale={} range=[{}, {}] step={}",
            widget.name(),
            state.scale,
            range.min,
            range.max,
            range.step
        );
        Ok(range)
    }

    fn parse_state(&self, name: &str) -> PlaygroundResult<SliderState> {
        let min = self.parse(SettingsField::Min)?;
        let max = self.parse(SettingsField::Max)?;
        let step = self.parse(SettingsField::Stepsize)?;
        let value = self.parse(SettingsField::InitialValue)?;

        SliderState::validated(name, self.scale, min, max, value, step)
    }

    fn parse(&self, field: SettingsField) -> PlaygroundResult<f64> {
        let text = self.field(field);
        text.trim()
            .parse::<f64>()
            .map_err(|_| PlaygroundError::InvalidField {
                field: field.key().to_string(),
                input: text.to_string(),
            })
    }
}
