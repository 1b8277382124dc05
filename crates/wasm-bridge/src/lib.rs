//! WASM bridge for the parameter playground
//! Fetches the plot and slider definitions, builds the control panel and wires
//! slider drags to debounced plot updates

use std::sync::Once;

use playground_config::PanelConfig;
use playground_shared::{PlaygroundError, PlotPayload, SliderDefinition, Trace};
use wasm_bindgen::prelude::*;
use wasm_fetch::FetchClient;

pub mod dom;
pub mod plotly;
mod session;

use plotly::PlotlyChart;
use session::{Session, SharedSession};

static LOGGING: Once = Once::new();

fn install_logging(level: log::Level) {
    LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        // Another logger may already own the facade
        let _ = console_log::init_with_level(level);
    });
}

/// Install the panic hook and console logger at the default level
#[wasm_bindgen]
pub fn init_logging() {
    install_logging(log::Level::Info);
}

#[wasm_bindgen]
pub struct ControlPanel {
    config: PanelConfig,
    session: Option<SharedSession>,
}

#[wasm_bindgen]
impl ControlPanel {
    /// Create a panel from an optional JSON configuration
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ControlPanel, JsValue> {
        let config = match config_json {
            Some(json) => PanelConfig::from_json(&json)?,
            None => PanelConfig::default(),
        };
        install_logging(config.log_level()?);

        Ok(ControlPanel {
            config,
            session: None,
        })
    }

    /// Draw the initial plot and build one slider per definition
    #[wasm_bindgen]
    pub async fn init(&mut self) -> Result<(), JsValue> {
        if self.session.is_some() {
            log::warn!("[ControlPanel] Already initialized");
            return Ok(());
        }

        let client = FetchClient::with_timeout(self.config.fetch_timeout_ms);

        let payload = initial_payload(&client, &self.config).await?;
        let chart = PlotlyChart::new_plot(&self.config.dom.plot_container, &payload)?;

        let url = &self.config.endpoints.slider_data;
        let definitions: Vec<SliderDefinition> = client
            .fetch_json(url)
            .await
            .map_err(|e| fetch_failed(url, e))?;

        let document = dom::document()?;
        let session = Session::new(self.config.clone(), chart);

        for definition in definitions {
            let name = definition.name.clone();
            if let Err(e) = session::add_slider(&session, &document, definition) {
                log::error!("[ControlPanel] Skipping slider {name}: {e:?}");
            }
        }
        session::install_document_listener(&session, &document)?;

        let count = session.borrow().slider_count();
        log::info!("[ControlPanel] Ready with {count} sliders");
        self.session = Some(session);
        Ok(())
    }

    /// Number of sliders built by `init`
    #[wasm_bindgen]
    pub fn slider_count(&self) -> usize {
        self.session
            .as_ref()
            .map(|s| s.borrow().slider_count())
            .unwrap_or(0)
    }
}

/// Fetch the full plot payload, falling back to the legacy single-trace route
async fn initial_payload(
    client: &FetchClient,
    config: &PanelConfig,
) -> Result<PlotPayload, PlaygroundError> {
    let endpoints = &config.endpoints;
    match client.fetch_json::<PlotPayload>(&endpoints.plot_data).await {
        Ok(payload) => return Ok(payload),
        Err(e) => log::warn!(
            "[ControlPanel] {} failed ({e:?}), trying {}",
            endpoints.plot_data,
            endpoints.initial_data
        ),
    }

    let trace: Trace = client
        .fetch_json(&endpoints.initial_data)
        .await
        .map_err(|e| fetch_failed(&endpoints.initial_data, e))?;
    Ok(PlotPayload::from_initial_trace(trace))
}

fn fetch_failed(url: &str, err: JsValue) -> PlaygroundError {
    let reason = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    let error = PlaygroundError::DataFetch {
        message: format!("{url}: {reason}"),
    };
    log::error!("[ControlPanel] {error}");
    error
}
