//! DOM construction for sliders, labels and settings menus

use playground_controls::{SettingsField, SettingsPanel, SliderRange, SliderWidget};
use playground_shared::Scale;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

/// Elements making up one slider row
pub struct SliderElements {
    pub name_label: Element,
    pub value_label: Element,
    pub input: HtmlInputElement,
}

/// Elements making up one settings menu
pub struct MenuElements {
    pub toggle: Element,
    pub menu: HtmlElement,
    pub scale_button: Element,
    pub fields: Vec<(SettingsField, HtmlInputElement)>,
    pub submit: Element,
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

pub fn container(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing container #{id}")))
}

pub fn slider_class(scale: Scale) -> String {
    format!("slider {scale}")
}

pub fn display_for(open: bool) -> &'static str {
    if open {
        "flex"
    } else {
        "none"
    }
}

/// Build the name label, value label and range input for a slider
pub fn build_slider(document: &Document, widget: &SliderWidget) -> Result<SliderElements, JsValue> {
    let name_label = labelled_span(document, &widget.name_label_id(), widget.name_label())?;
    let value_label = labelled_span(document, &widget.value_label_id(), widget.value_label())?;

    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_id(&widget.slider_id());
    input.set_type("range");
    apply_range(&input, widget.scale(), &widget.range());

    Ok(SliderElements {
        name_label,
        value_label,
        input,
    })
}

/// Write transformed bounds, step and value onto the range input
pub fn apply_range(input: &HtmlInputElement, scale: Scale, range: &SliderRange) {
    input.set_class_name(&slider_class(scale));
    // Bounds before value so the browser does not clamp it to stale limits
    input.set_min(&range.min.to_string());
    input.set_max(&range.max.to_string());
    input.set_step(&range.step.to_string());
    input.set_value(&range.value.to_string());
}

/// Set the text of a value label built by [`build_slider`]
pub fn set_value_label(label: &Element, text: &str) {
    match label.first_element_child() {
        Some(span) => span.set_text_content(Some(text)),
        None => label.set_text_content(Some(text)),
    }
}

/// Build the "Settings" toggle button with its hidden menu inside it
pub fn build_menu(document: &Document, panel: &SettingsPanel) -> Result<MenuElements, JsValue> {
    let toggle = document.create_element("button")?;
    toggle.set_class_name("settings-button");
    toggle.set_text_content(Some("Settings"));

    let menu: HtmlElement = document.create_element("div")?.dyn_into()?;
    menu.set_id(&panel.id().dom_id());
    menu.set_class_name("settings-menu");
    menu.style().set_property("display", display_for(false))?;

    let scale_button = document.create_element("button")?;
    scale_button.set_class_name("scale-button");
    scale_button.set_text_content(Some(panel.scale().as_str()));

    let field_container = document.create_element("div")?;
    field_container.set_class_name("field-container");
    let labels = document.create_element("div")?;
    labels.set_class_name("field-labels");
    let inputs = document.create_element("div")?;
    inputs.set_class_name("fields");

    let mut fields = Vec::with_capacity(SettingsField::ALL.len());
    for field in SettingsField::ALL {
        let label = document.create_element("span")?;
        label.set_class_name("field-label");
        label.set_text_content(Some(field.label()));
        labels.append_child(&label)?;

        let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        input.set_class_name(&field.css_class());
        input.set_value(panel.field(field));
        inputs.append_child(&input)?;

        fields.push((field, input));
    }

    field_container.append_child(&labels)?;
    field_container.append_child(&inputs)?;

    let submit = document.create_element("button")?;
    submit.set_class_name("submit-button");
    submit.set_text_content(Some("Submit"));

    menu.append_child(&scale_button)?;
    menu.append_child(&field_container)?;
    menu.append_child(&submit)?;
    toggle.append_child(&menu)?;

    Ok(MenuElements {
        toggle,
        menu,
        scale_button,
        fields,
        submit,
    })
}

pub fn set_menu_open(menu: &HtmlElement, open: bool) {
    if let Err(e) = menu.style().set_property("display", display_for(open)) {
        log::error!("Failed to set menu display: {e:?}");
    }
}

fn labelled_span(document: &Document, id: &str, text: &str) -> Result<Element, JsValue> {
    let wrapper = document.create_element("div")?;
    let span = document.create_element("span")?;
    span.set_id(id);
    span.set_text_content(Some(text));
    wrapper.append_child(&span)?;
    Ok(wrapper)
}
