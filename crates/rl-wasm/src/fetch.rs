//! `Transport` over the browser's `fetch`.

use rl_core::JSON_CONTENT_TYPE;
use rl_form::{Transport, TransportError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// POSTs JSON with `window.fetch`. No timeout, no abort signal.
///
/// The HTTP status is not inspected: error statuses still carry a body that
/// the protocol layer interprets.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post_json(&self, path: &str, body: String) -> Result<String, TransportError> {
        let response = send(path, &body)
            .await
            .map_err(|e| TransportError::Network(js_error_message(&e)))?;
        let text_promise = response
            .text()
            .map_err(|e| TransportError::Body(js_error_message(&e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| TransportError::Body(js_error_message(&e)))?;
        text.as_string()
            .ok_or_else(|| TransportError::Body("response body is not text".to_string()))
    }
}

async fn send(path: &str, body: &str) -> Result<Response, JsValue> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(path, &init)?;
    request.headers().set("Content-Type", JSON_CONTENT_TYPE)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    response.dyn_into()
}

/// Best-effort readable text for a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
