//! Shared show/hide dispatcher for settings panels
//!
//! One dispatcher serves every panel on the page, so a single document-level
//! click listener is enough no matter how many sliders are added.

use std::collections::HashMap;
use uuid::Uuid;

/// Identity of one settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(Uuid);

impl PanelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// DOM-safe id string
    pub fn dom_id(&self) -> String {
        format!("settings-{}", self.0.simple())
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a document click landed, relative to the registered panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the panel body
    Panel(PanelId),
    /// On the panel's "Settings" toggle button
    Toggle(PanelId),
    Elsewhere,
}

#[derive(Debug, Default)]
pub struct PanelDispatcher {
    open: HashMap<PanelId, bool>,
}

impl PanelDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel; panels start hidden
    pub fn register(&mut self, id: PanelId) {
        self.open.insert(id, false);
    }

    pub fn is_open(&self, id: PanelId) -> bool {
        self.open.get(&id).copied().unwrap_or(false)
    }

    /// The toggle button was clicked. Clicks that bubble up from inside the
    /// panel do not reopen it.
    pub fn toggle_clicked(&mut self, id: PanelId, inside_panel: bool) -> bool {
        if inside_panel {
            return false;
        }
        match self.open.get_mut(&id) {
            Some(open) => {
                *open = true;
                true
            }
            None => {
                log::warn!("Toggle clicked for unregistered panel {id:?}");
                false
            }
        }
    }

    /// Hide every panel the click was neither inside nor the toggle of.
    /// Returns the panels that were closed.
    pub fn document_clicked(&mut self, target: ClickTarget) -> Vec<PanelId> {
        let mut closed = Vec::new();

        for (id, open) in self.open.iter_mut() {
            let keep = match target {
                ClickTarget::Panel(hit) | ClickTarget::Toggle(hit) => hit == *id,
                ClickTarget::Elsewhere => false,
            };
            if *open && !keep {
                *open = false;
                closed.push(*id);
            }
        }

        closed
    }

    pub fn hide(&mut self, id: PanelId) {
        if let Some(open) = self.open.get_mut(&id) {
            *open = false;
        }
    }
}
