//! Plotly interop: draws the chart and reads back legend visibility

use playground_controls::ChartSurface;
use playground_shared::{PlaygroundResult, PlotPayload, TraceVisibility, VisibilitySnapshot};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Plotly, js_name = newPlot)]
    fn plotly_new_plot(
        div: &str,
        data: &JsValue,
        layout: &JsValue,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = Plotly, js_name = react)]
    fn plotly_react(
        div: &str,
        data: &JsValue,
        layout: &JsValue,
    ) -> Result<js_sys::Promise, JsValue>;
}

/// The Plotly chart living in one container element
pub struct PlotlyChart {
    container_id: String,
}

impl PlotlyChart {
    /// First draw into `container_id`
    pub fn new_plot(container_id: &str, payload: &PlotPayload) -> PlaygroundResult<Self> {
        let (data, layout) = to_js(payload)?;
        plotly_new_plot(container_id, &data, &layout)?;

        log::info!(
            "[PlotlyChart] Drew {} traces into #{}",
            payload.traces.len(),
            container_id
        );

        Ok(Self {
            container_id: container_id.to_string(),
        })
    }

    fn traces(&self) -> Option<js_sys::Array> {
        let div = web_sys::window()?
            .document()?
            .get_element_by_id(&self.container_id)?;
        let data = js_sys::Reflect::get(&div, &JsValue::from_str("data")).ok()?;
        data.dyn_into::<js_sys::Array>().ok()
    }
}

impl ChartSurface for PlotlyChart {
    fn visibility_snapshot(&self) -> VisibilitySnapshot {
        let Some(traces) = self.traces() else {
            log::warn!("[PlotlyChart] No trace data on #{}", self.container_id);
            return Vec::new();
        };

        traces
            .iter()
            .map(|trace| {
                let visible = js_sys::Reflect::get(&trace, &JsValue::from_str("visible")).ok()?;
                visibility_from_js(&visible)
            })
            .collect()
    }

    fn repaint(&mut self, payload: &PlotPayload) -> PlaygroundResult<()> {
        let (data, layout) = to_js(payload)?;
        plotly_react(&self.container_id, &data, &layout)?;
        Ok(())
    }
}

fn visibility_from_js(value: &JsValue) -> Option<TraceVisibility> {
    if let Some(flag) = value.as_bool() {
        return Some(TraceVisibility::Flag(flag));
    }
    value.as_string().map(TraceVisibility::State)
}

fn to_js(payload: &PlotPayload) -> PlaygroundResult<(JsValue, JsValue)> {
    // Plain objects rather than ES Maps, which Plotly does not read
    let serializer = Serializer::json_compatible();
    let data = payload.traces.serialize(&serializer).map_err(JsValue::from)?;
    let layout = payload.layout.serialize(&serializer).map_err(JsValue::from)?;
    Ok((data, layout))
}
