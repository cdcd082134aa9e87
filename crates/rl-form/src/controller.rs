//! Parameter form controller.
//!
//! Two handlers drive the form:
//!
//! - **Algorithm change**: re-render the parameter inputs from the schema of
//!   the newly selected algorithm, initialized to their defaults.
//! - **Run click**: collect the live input values, post them as a
//!   [`RunRequest`], and show the returned image.
//!
//! A run is split into [`FormController::prepare_run`] and
//! [`FormController::complete_run`] so a host can await the transport without
//! holding a borrow of the controller. Overlapping runs are not prevented;
//! replies are applied in arrival order.

use crate::config::ControllerConfig;
use crate::transport::{Transport, TransportError};
use crate::view::FormView;
use rl_core::{
    Algorithm, AlgorithmParams, LintSeverity, ParamError, ParameterValues, ProtocolError,
    RunRequest, ServerReply, data_uri, lint_parameters, schema_for,
};

/// Notice shown when Run is clicked with nothing selected.
pub const SELECT_ALGORITHM_NOTICE: &str = "Please select an algorithm";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("no algorithm selected")]
    NoAlgorithm,
    #[error("invalid parameters: {}", .0.join("; "))]
    InvalidParams(Vec<String>),
    #[error(transparent)]
    Params(#[from] ParamError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Per-controller submission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    AwaitingResponse,
}

/// A request ready to go out, with its serialized body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub endpoint: String,
    pub request: RunRequest,
    pub body: String,
}

pub struct FormController<V: FormView> {
    view: V,
    config: ControllerConfig,
    /// Algorithm whose fields are currently rendered.
    rendered: Option<Algorithm>,
    /// Submissions sent but not yet completed.
    in_flight: usize,
}

impl<V: FormView> FormController<V> {
    pub fn new(view: V) -> Self {
        Self::with_config(view, ControllerConfig::default())
    }

    pub fn with_config(view: V, config: ControllerConfig) -> Self {
        Self {
            view,
            config,
            rendered: None,
            in_flight: 0,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Takes effect from the next run.
    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    pub fn rendered_algorithm(&self) -> Option<Algorithm> {
        self.rendered
    }

    pub fn state(&self) -> RunState {
        if self.in_flight > 0 {
            RunState::AwaitingResponse
        } else {
            RunState::Idle
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ─── Algorithm change ────────────────────────────────────────────────

    /// Replace the rendered inputs with the schema of `selection`.
    /// Unknown or empty selections leave the parameter area empty.
    pub fn on_algorithm_change(&mut self, selection: &str) {
        self.view.clear_parameters();
        self.rendered = Algorithm::from_name(selection);
        let Some(algorithm) = self.rendered else {
            log::debug!("cleared parameters for selection {selection:?}");
            return;
        };
        for field in schema_for(algorithm) {
            self.view.append_field(field);
        }
        log::debug!(
            "rendered {} parameter fields for {algorithm}",
            schema_for(algorithm).len()
        );
    }

    // ─── Run ─────────────────────────────────────────────────────────────

    /// Live `(id → value)` of every rendered input, in document order.
    pub fn collect_parameters(&self) -> ParameterValues {
        self.view.rendered_inputs().into_iter().collect()
    }

    /// Check the precondition, collect values, and build the request.
    /// On success the submission counts as in flight until
    /// [`complete_run`](Self::complete_run) is called.
    ///
    /// # Errors
    /// `NoAlgorithm` (notice shown, nothing sent) when the select is empty
    /// or holds an unknown value. In strict mode, `InvalidParams` when the
    /// lint reports warnings.
    pub fn prepare_run(&mut self) -> Result<Submission, FormError> {
        let selection = self.view.selected_algorithm();
        let Some(algorithm) = Algorithm::from_name(&selection) else {
            if !selection.is_empty() {
                log::warn!("ignoring run for unknown algorithm {selection:?}");
            }
            self.view.notify_user(SELECT_ALGORITHM_NOTICE);
            return Err(FormError::NoAlgorithm);
        };

        let parameters = self.collect_parameters();
        let request = if self.config.strict_params {
            self.strict_request(algorithm, &parameters)?
        } else {
            RunRequest::new(algorithm, parameters)
        };
        let body = request.to_json()?;

        self.in_flight += 1;
        log::info!(
            "submitting {algorithm} to {} ({} in flight)",
            self.config.endpoint,
            self.in_flight
        );
        Ok(Submission {
            endpoint: self.config.endpoint.clone(),
            request,
            body,
        })
    }

    fn strict_request(
        &mut self,
        algorithm: Algorithm,
        parameters: &ParameterValues,
    ) -> Result<RunRequest, FormError> {
        let problems: Vec<String> = lint_parameters(algorithm, parameters)
            .into_iter()
            .filter(|d| d.severity == LintSeverity::Warning)
            .map(|d| d.message)
            .collect();
        if !problems.is_empty() {
            log::warn!("refusing {algorithm} run: {}", problems.join("; "));
            self.view.notify_user(&problems.join("\n"));
            return Err(FormError::InvalidParams(problems));
        }
        let params = AlgorithmParams::from_values(algorithm, parameters)?;
        Ok(RunRequest::from_params(algorithm, &params))
    }

    /// Apply the outcome of a submission made by [`prepare_run`](Self::prepare_run).
    ///
    /// Transport and parse failures are logged only. A reply lacking `result`
    /// leaves the current image in place.
    ///
    /// # Errors
    /// Returns the failure after logging it, for callers that care.
    pub fn complete_run(
        &mut self,
        outcome: Result<String, TransportError>,
    ) -> Result<(), FormError> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let body = outcome.inspect_err(|e| log::error!("run failed: {e}"))?;
        match ServerReply::parse(&body) {
            Ok(payload) => {
                let src = data_uri(&self.config.image_mime, &payload);
                self.view.set_image_source(&src);
                log::debug!("result image updated ({} base64 bytes)", payload.len());
                Ok(())
            }
            Err(ProtocolError::Server(message)) => {
                log::error!("server rejected run: {message}");
                if self.config.surface_server_errors {
                    self.view.notify_user(&format!("Server error: {message}"));
                }
                Err(ProtocolError::Server(message).into())
            }
            Err(e) => {
                log::error!("unusable run response: {e}");
                Err(e.into())
            }
        }
    }

    /// Full click handler: prepare, post, complete.
    ///
    /// # Errors
    /// See [`prepare_run`](Self::prepare_run) and [`complete_run`](Self::complete_run).
    pub async fn on_run_clicked<T: Transport>(&mut self, transport: &T) -> Result<(), FormError> {
        let submission = self.prepare_run()?;
        let outcome = transport
            .post_json(&submission.endpoint, submission.body)
            .await;
        self.complete_run(outcome)
    }
}
