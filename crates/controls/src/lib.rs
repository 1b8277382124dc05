//! Slider controls for the Model Playground panel
//!
//! Everything here is plain Rust with no DOM access: the value transform,
//! label formatting, slider and settings state, the settings-panel visibility
//! dispatcher and the debounced update controller. The wasm-bridge crate wires
//! these to the page.

pub mod debounce;
pub mod format;
pub mod panels;
pub mod settings;
pub mod slider;
pub mod transform;
pub mod update;

pub use debounce::Debouncer;
pub use format::format_scientific;
pub use panels::{ClickTarget, PanelDispatcher, PanelId};
pub use settings::{SettingsField, SettingsPanel};
pub use slider::{SliderState, SliderWidget};
pub use transform::{ScaleTransform, SliderRange};
pub use update::{
    merge_visibility, ChartSurface, DispatchedUpdate, Reconciled, UpdateController,
    DEFAULT_DEBOUNCE,
};
