//! JSON over the browser's fetch API

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

/// WASM-compatible HTTP client using browser's fetch API
pub struct FetchClient {
    timeout_ms: u32,
}

impl FetchClient {
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    /// GET `url` and decode the JSON body
    pub async fn fetch_json<T>(&self, url: &str) -> Result<T, JsValue>
    where
        T: serde::de::DeserializeOwned,
    {
        let opts = RequestInit::new();
        opts.set_method("GET");

        let headers = Headers::new()?;
        headers.set("Accept", "application/json")?;
        opts.set_headers(&headers);

        self.send(url, &opts).await
    }

    /// POST `body` as JSON to `url` and decode the JSON reply
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, JsValue>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let payload = serde_json::to_string(body)
            .map_err(|e| JsValue::from_str(&format!("JSON encode error: {}", e)))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&payload));

        let headers = Headers::new()?;
        headers.set("Content-Type", "application/json")?;
        headers.set("Accept", "application/json")?;
        opts.set_headers(&headers);

        self.send(url, &opts).await
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        opts: &RequestInit,
    ) -> Result<T, JsValue> {
        // Create abort controller for timeout
        let abort_controller = AbortController::new()?;
        opts.set_signal(Some(&abort_controller.signal()));

        let request = Request::new_with_str_and_init(url, opts)?;

        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;

        let timeout_closure = Closure::once(Box::new(move || {
            abort_controller.abort();
        }) as Box<dyn FnOnce()>);
        let timeout_handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            timeout_closure.as_ref().unchecked_ref(),
            self.timeout_ms as i32,
        )?;

        let result = JsFuture::from(window.fetch_with_request(&request)).await;
        window.clear_timeout_with_handle(timeout_handle);
        // Dropped only after the timer is cleared
        drop(timeout_closure);

        let resp: Response = result?.dyn_into()?;

        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "HTTP error! status: {}",
                resp.status()
            )));
        }

        let text = JsFuture::from(resp.text()?).await?;
        let text = text
            .as_string()
            .ok_or_else(|| JsValue::from_str("Response body is not text"))?;

        serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))
    }
}
