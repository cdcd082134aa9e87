//! WASM bridge for Raster Lab — binds the parameter form controller to the page.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the demo page,
//! which must already contain:
//!
//! | id            | element    |
//! |---------------|------------|
//! | `algorithm`   | `<select>` |
//! | `parameters`  | container  |
//! | `runButton`   | button     |
//! | `resultImage` | `<img>`    |

mod dom;
mod fetch;
mod logger;

pub use dom::DomView;
pub use fetch::FetchTransport;

use rl_core::{Algorithm, AlgorithmParams, ParameterValues, RunRequest, lint_parameters};
use rl_form::{ControllerConfig, FormController, RunState, Transport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, HtmlImageElement, HtmlSelectElement};

type SharedController = Rc<RefCell<FormController<DomView>>>;
type Listener = Closure<dyn FnMut(Event)>;

/// The page-facing form controller.
///
/// Owns the `change` and `click` listeners it installs; dropping it (or
/// calling `free()` from JS) detaches them.
#[wasm_bindgen]
pub struct RasterForm {
    controller: SharedController,
    select: HtmlSelectElement,
    button: HtmlElement,
    on_change: Listener,
    on_click: Listener,
}

#[wasm_bindgen]
impl RasterForm {
    /// Bind to explicitly supplied elements. `endpoint` defaults to
    /// `/run_algorithm`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        select: HtmlSelectElement,
        container: HtmlElement,
        button: HtmlElement,
        image: HtmlImageElement,
        endpoint: Option<String>,
    ) -> Result<RasterForm, JsValue> {
        logger::install(log::LevelFilter::Info);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let config = endpoint
            .map_or_else(ControllerConfig::default, |e| ControllerConfig::with_endpoint(e));
        let view = DomView::new(document, select.clone(), container, image);
        let controller: SharedController =
            Rc::new(RefCell::new(FormController::with_config(view, config)));

        let on_change = {
            let controller = Rc::clone(&controller);
            let select = select.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                controller.borrow_mut().on_algorithm_change(&select.value());
            })
        };
        let on_click = {
            let controller = Rc::clone(&controller);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| start_run(&controller))
        };

        listen(&select, "change", &on_change)?;
        listen(&button, "click", &on_click)?;

        Ok(RasterForm {
            controller,
            select,
            button,
            on_change,
            on_click,
        })
    }

    /// Bind to the standard element ids of the demo page.
    pub fn attach() -> Result<RasterForm, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
        };
        RasterForm::new(
            by_id("algorithm")?.dyn_into()?,
            by_id("parameters")?.dyn_into()?,
            by_id("runButton")?.dyn_into()?,
            by_id("resultImage")?.dyn_into()?,
            None,
        )
    }

    /// Re-render the parameter inputs for `selection`.
    #[wasm_bindgen(js_name = onAlgorithmChange)]
    pub fn on_algorithm_change(&self, selection: &str) {
        self.controller.borrow_mut().on_algorithm_change(selection);
    }

    /// Same as clicking the Run button.
    #[wasm_bindgen(js_name = onRunClicked)]
    pub fn on_run_clicked(&self) {
        start_run(&self.controller);
    }

    /// Current input values as a JSON object.
    #[wasm_bindgen(js_name = collectParameters)]
    pub fn collect_parameters(&self) -> String {
        let values = self.controller.borrow().collect_parameters();
        serde_json::to_string(&values).unwrap_or_else(|_| "{}".to_string())
    }

    /// `"idle"` or `"awaiting_response"`.
    pub fn state(&self) -> String {
        match self.controller.borrow().state() {
            RunState::Idle => "idle".to_string(),
            RunState::AwaitingResponse => "awaiting_response".to_string(),
        }
    }

    /// Turn strict parameter checking on or off.
    #[wasm_bindgen(js_name = setStrict)]
    pub fn set_strict(&self, strict: bool) {
        self.controller.borrow_mut().config_mut().strict_params = strict;
    }
}

impl Drop for RasterForm {
    fn drop(&mut self) {
        unlisten(&self.select, "change", &self.on_change);
        unlisten(&self.button, "click", &self.on_click);
    }
}

fn listen(target: &EventTarget, event: &str, listener: &Listener) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
}

fn unlisten(target: &EventTarget, event: &str, listener: &Listener) {
    if let Err(e) =
        target.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
    {
        log::warn!("failed to detach {event} listener: {e:?}");
    }
}

/// Prepare synchronously, then await the fetch without holding the borrow so
/// the page stays responsive and further clicks can overlap.
fn start_run(controller: &SharedController) {
    let prepared = controller.borrow_mut().prepare_run();
    let submission = match prepared {
        Ok(submission) => submission,
        Err(e) => {
            log::debug!("run not started: {e}");
            return;
        }
    };
    let controller = Rc::clone(controller);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = FetchTransport
            .post_json(&submission.endpoint, submission.body)
            .await;
        // Failures are logged inside complete_run.
        let _ = controller.borrow_mut().complete_run(outcome);
    });
}

/// Set the console log level (`"off"`, `"error"`, … `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

// ─── Standalone helpers (no page needed) ─────────────────────────────────

/// Field descriptors for an algorithm as JSON:
/// `[{"id":"x1","label":"X1:","type":"number","default":"5"}, ...]`.
/// Unknown names give `[]`.
#[wasm_bindgen(js_name = schemaJson)]
pub fn schema_json(algorithm: &str) -> String {
    let fields: Vec<serde_json::Value> = rl_core::schema_for_name(algorithm)
        .iter()
        .map(|f| {
            serde_json::json!({
                "id": f.id,
                "label": f.label,
                "type": f.input_type,
                "default": f.default_value,
            })
        })
        .collect();
    serde_json::Value::Array(fields).to_string()
}

/// Build and check a run body from an algorithm name and a JSON object of
/// string values. Returns `{"ok":true,"body":"..."}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen(js_name = buildRequestJson)]
pub fn build_request_json(algorithm: &str, params_json: &str) -> String {
    let result = (|| -> Result<String, String> {
        let algorithm: Algorithm = algorithm.parse().map_err(|e| format!("{e}"))?;
        let values: ParameterValues =
            serde_json::from_str(params_json).map_err(|e| format!("invalid parameters: {e}"))?;
        let params = AlgorithmParams::from_values(algorithm, &values).map_err(|e| e.to_string())?;
        RunRequest::from_params(algorithm, &params)
            .to_json()
            .map_err(|e| e.to_string())
    })();
    match result {
        Ok(body) => serde_json::json!({ "ok": true, "body": body }).to_string(),
        Err(error) => serde_json::json!({ "ok": false, "error": error }).to_string(),
    }
}

/// Lint a JSON object of values for an algorithm. Returns a JSON array of
/// `{"field","message","severity","rule"}`.
#[wasm_bindgen(js_name = lintJson)]
pub fn lint_json(algorithm: &str, params_json: &str) -> String {
    let Some(algorithm) = Algorithm::from_name(algorithm) else {
        return "[]".to_string();
    };
    let Ok(values) = serde_json::from_str::<ParameterValues>(params_json) else {
        return "[]".to_string();
    };
    let diags: Vec<serde_json::Value> = lint_parameters(algorithm, &values)
        .into_iter()
        .map(|d| {
            serde_json::json!({
                "field": d.field,
                "message": d.message,
                "severity": match d.severity {
                    rl_core::LintSeverity::Warning => "warning",
                    rl_core::LintSeverity::Info => "info",
                },
                "rule": d.rule,
            })
        })
        .collect();
    serde_json::Value::Array(diags).to_string()
}
