//! Controller configuration.

use rl_core::RUN_ENDPOINT;

/// Configuration for [`FormController`](crate::FormController).
///
/// The defaults reproduce the plain form: post raw values to
/// `/run_algorithm` and show the reply as a PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Path runs are posted to.
    pub endpoint: String,

    /// MIME type used in the result image's data URI. Default: `image/png`.
    pub image_mime: String,

    /// Lint parameters before sending and refuse runs with warnings.
    /// Default: **false**, values go out exactly as typed.
    pub strict_params: bool,

    /// Show `{"error": ...}` replies to the user instead of only logging them.
    /// Default: **true**.
    pub surface_server_errors: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            endpoint: RUN_ENDPOINT.to_string(),
            image_mime: "image/png".to_string(),
            strict_params: false,
            surface_server_errors: true,
        }
    }
}

impl ControllerConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}
