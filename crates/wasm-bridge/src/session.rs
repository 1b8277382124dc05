//! Page session: owns every slider binding and routes DOM events into the
//! controls crate. All state sits behind one `Rc<RefCell<_>>` on the UI thread.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use playground_config::PanelConfig;
use playground_controls::{
    ClickTarget, DispatchedUpdate, PanelDispatcher, PanelId, Reconciled, SettingsField,
    SettingsPanel, SliderWidget, UpdateController,
};
use playground_shared::{PlaygroundResult, PlotPayload, SliderDefinition};
use wasm_bindgen::prelude::*;
use wasm_fetch::FetchClient;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, Node};

use crate::dom::{self, MenuElements, SliderElements};
use crate::plotly::PlotlyChart;

/// DOM handles and state for one slider + settings menu pair
struct SliderBinding {
    widget: SliderWidget,
    panel: SettingsPanel,
    input: HtmlInputElement,
    value_label: Element,
    toggle: Element,
    menu: HtmlElement,
    scale_button: Element,
    fields: Vec<(SettingsField, HtmlInputElement)>,
    timer: Option<i32>,
    on_timeout: js_sys::Function,
}

pub struct Session {
    config: PanelConfig,
    chart: PlotlyChart,
    controller: UpdateController,
    dispatcher: PanelDispatcher,
    sliders: HashMap<String, SliderBinding>,
    panel_owners: HashMap<PanelId, String>,
}

pub type SharedSession = Rc<RefCell<Session>>;

impl Session {
    pub fn new(config: PanelConfig, chart: PlotlyChart) -> SharedSession {
        let delay = std::time::Duration::from_millis(config.debounce_ms as u64);
        Rc::new(RefCell::new(Self {
            config,
            chart,
            controller: UpdateController::new(delay),
            dispatcher: PanelDispatcher::new(),
            sliders: HashMap::new(),
            panel_owners: HashMap::new(),
        }))
    }

    pub fn slider_count(&self) -> usize {
        self.sliders.len()
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Build the slider and settings menu for `definition` and append them to the page.
/// Nothing is attached unless every container exists.
pub fn add_slider(
    session: &SharedSession,
    document: &Document,
    definition: SliderDefinition,
) -> Result<(), JsValue> {
    let config = session.borrow().config.clone();

    let widget = SliderWidget::new(definition, config.label_decimals)?;
    let name = widget.name().to_string();
    if session.borrow().sliders.contains_key(&name) {
        log::warn!("[ControlPanel] Duplicate slider {name}, skipping");
        return Ok(());
    }

    let name_labels = dom::container(document, &config.dom.name_labels)?;
    let value_labels = dom::container(document, &config.dom.value_labels)?;
    let sliders = dom::container(document, &config.dom.sliders)?;
    let settings_buttons = dom::container(document, &config.dom.settings_buttons)?;

    let panel = SettingsPanel::new(&widget);
    let SliderElements {
        name_label,
        value_label,
        input,
    } = dom::build_slider(document, &widget)?;
    let MenuElements {
        toggle,
        menu,
        scale_button,
        fields,
        submit,
    } = dom::build_menu(document, &panel)?;

    name_labels.append_child(&name_label)?;
    value_labels.append_child(&value_label)?;
    sliders.append_child(&input)?;
    settings_buttons.append_child(&toggle)?;

    // Debounce timer callback, reused for every re-arm
    let on_timeout = {
        let session = Rc::clone(session);
        let name = name.clone();
        Closure::<dyn FnMut()>::new(move || fire_update(&session, &name))
            .into_js_value()
            .unchecked_into::<js_sys::Function>()
    };

    listen(&input, "input", {
        let session = Rc::clone(session);
        let name = name.clone();
        move |_| on_input(&session, &name)
    })?;

    listen(&toggle, "click", {
        let session = Rc::clone(session);
        let name = name.clone();
        move |event| on_toggle_click(&session, &name, &event)
    })?;

    listen(&scale_button, "click", {
        let session = Rc::clone(session);
        let name = name.clone();
        move |_| on_scale_click(&session, &name)
    })?;

    listen(&submit, "click", {
        let session = Rc::clone(session);
        let name = name.clone();
        move |_| on_submit(&session, &name)
    })?;

    let mut state = session.borrow_mut();
    state.dispatcher.register(panel.id());
    state.panel_owners.insert(panel.id(), name.clone());
    state.sliders.insert(
        name.clone(),
        SliderBinding {
            widget,
            panel,
            input,
            value_label,
            toggle,
            menu,
            scale_button,
            fields,
            timer: None,
            on_timeout,
        },
    );

    log::debug!("[ControlPanel] Added slider {name}");
    Ok(())
}

/// Install the single document-level click listener shared by all menus
pub fn install_document_listener(
    session: &SharedSession,
    document: &Document,
) -> Result<(), JsValue> {
    let session = Rc::clone(session);
    listen(document, "click", move |event| {
        on_document_click(&session, &event)
    })
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn on_input(session: &SharedSession, name: &str) {
    let mut state = session.borrow_mut();
    let Session {
        controller,
        sliders,
        ..
    } = &mut *state;
    let Some(binding) = sliders.get_mut(name) else {
        return;
    };

    let Ok(position) = binding.input.value().parse::<f64>() else {
        log::warn!("[ControlPanel] Unreadable slider position for {name}");
        return;
    };

    let update = binding.widget.on_input(position);
    dom::set_value_label(&binding.value_label, binding.widget.value_label());

    let now = now_ms();
    let deadline = controller.schedule(update, now);

    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(handle) = binding.timer.take() {
        window.clear_timeout_with_handle(handle);
    }
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        &binding.on_timeout,
        (deadline - now).max(0.0).ceil() as i32,
    ) {
        Ok(handle) => binding.timer = Some(handle),
        Err(e) => log::error!("[ControlPanel] Failed to arm debounce timer: {e:?}"),
    }
}

fn fire_update(session: &SharedSession, name: &str) {
    let (dispatched, url, timeout_ms) = {
        let mut state = session.borrow_mut();
        let Session {
            controller,
            chart,
            sliders,
            config,
            ..
        } = &mut *state;
        if let Some(binding) = sliders.get_mut(name) {
            binding.timer = None;
        }
        let Some(dispatched) = controller.fire(name, &*chart) else {
            return;
        };
        (
            dispatched,
            config.endpoints.update.clone(),
            config.fetch_timeout_ms,
        )
    };

    let session = Rc::clone(session);
    wasm_bindgen_futures::spawn_local(async move {
        let client = FetchClient::with_timeout(timeout_ms);
        match client
            .post_json::<_, PlotPayload>(&url, &dispatched.update)
            .await
        {
            Ok(payload) => {
                // Outcome is logged inside
                let _ = apply_response(&session, &dispatched, payload);
            }
            Err(e) => log::error!(
                "[ControlPanel] Update #{} for {} failed: {e:?}",
                dispatched.sequence,
                dispatched.update.param_name
            ),
        }
    });
}

fn apply_response(
    session: &SharedSession,
    dispatched: &DispatchedUpdate,
    payload: PlotPayload,
) -> PlaygroundResult<Reconciled> {
    let mut state = session.borrow_mut();
    let Session {
        controller, chart, ..
    } = &mut *state;

    let outcome = controller.reconcile(dispatched, payload, chart);
    match &outcome {
        Ok(Reconciled::Applied { restored }) => log::debug!(
            "[ControlPanel] Update #{} applied, {restored} legend states kept",
            dispatched.sequence
        ),
        Ok(Reconciled::Stale { latest }) => log::debug!(
            "[ControlPanel] Update #{} superseded by #{latest}",
            dispatched.sequence
        ),
        Err(e) => log::error!("[ControlPanel] Repaint failed: {e}"),
    }
    outcome
}

fn event_node(event: &Event) -> Option<Node> {
    event.target().and_then(|t| t.dyn_into::<Node>().ok())
}

fn on_toggle_click(session: &SharedSession, name: &str, event: &Event) {
    let mut state = session.borrow_mut();
    let Session {
        dispatcher,
        sliders,
        ..
    } = &mut *state;
    let Some(binding) = sliders.get(name) else {
        return;
    };

    let target = event_node(event);
    let inside = binding.menu.contains(target.as_ref());
    if dispatcher.toggle_clicked(binding.panel.id(), inside) {
        dom::set_menu_open(&binding.menu, true);
    }
}

fn on_scale_click(session: &SharedSession, name: &str) {
    let mut state = session.borrow_mut();
    if let Some(binding) = state.sliders.get_mut(name) {
        let scale = binding.panel.toggle_scale();
        binding.scale_button.set_text_content(Some(scale.as_str()));
    }
}

fn on_submit(session: &SharedSession, name: &str) {
    let mut state = session.borrow_mut();
    let Session {
        dispatcher,
        sliders,
        ..
    } = &mut *state;
    let Some(binding) = sliders.get_mut(name) else {
        return;
    };

    for (field, input) in &binding.fields {
        binding.panel.set_field(*field, input.value());
    }

    // Rejections are already logged; the menu stays open
    if let Ok(range) = binding.panel.submit(&mut binding.widget, dispatcher) {
        dom::apply_range(&binding.input, binding.widget.scale(), &range);
        dom::set_value_label(&binding.value_label, binding.widget.value_label());
        dom::set_menu_open(&binding.menu, dispatcher.is_open(binding.panel.id()));
    }
}

fn click_target(sliders: &HashMap<String, SliderBinding>, node: Option<&Node>) -> ClickTarget {
    sliders
        .values()
        .find_map(|binding| {
            if binding.menu.contains(node) {
                Some(ClickTarget::Panel(binding.panel.id()))
            } else if binding.toggle.is_same_node(node) {
                Some(ClickTarget::Toggle(binding.panel.id()))
            } else {
                None
            }
        })
        .unwrap_or(ClickTarget::Elsewhere)
}

fn on_document_click(session: &SharedSession, event: &Event) {
    let mut state = session.borrow_mut();
    let Session {
        dispatcher,
        sliders,
        panel_owners,
        ..
    } = &mut *state;

    let node = event_node(event);
    let target = click_target(sliders, node.as_ref());

    for id in dispatcher.document_clicked(target) {
        if let Some(binding) = panel_owners.get(&id).and_then(|name| sliders.get(name)) {
            dom::set_menu_open(&binding.menu, false);
        }
    }
}
