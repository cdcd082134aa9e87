//! Client ↔ server run protocol.
//!
//! ```text
//! POST /run_algorithm          Content-Type: application/json
//! {"algorithm": "dda", "parameters": {"x1": "5", ...}}
//!
//! 200 {"result": "<base64 PNG>"}
//!     {"error": "<message>"}
//! ```

use crate::algorithm::Algorithm;
use crate::params::{AlgorithmParams, ParameterValues};
use serde::{Deserialize, Serialize};

/// Path the form posts runs to.
pub const RUN_ENDPOINT: &str = "/run_algorithm";

pub const JSON_CONTENT_TYPE: &str = "application/json";

const PNG_MIME: &str = "image/png";

/// Body of a run submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub algorithm: Algorithm,
    pub parameters: ParameterValues,
}

impl RunRequest {
    pub fn new(algorithm: Algorithm, parameters: ParameterValues) -> Self {
        Self {
            algorithm,
            parameters,
        }
    }

    pub fn from_params(algorithm: Algorithm, params: &AlgorithmParams) -> Self {
        Self::new(algorithm, params.to_values())
    }

    /// # Errors
    /// Only if serialization itself fails, which plain strings never do.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Json(e.to_string()))
    }
}

/// Successful reply: a base64-encoded PNG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    pub result: String,
}

/// Reply the server sends when it rejects a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("response has no `result` field")]
    MissingResult,
}

/// Either shape the server may answer with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServerReply {
    Ok(RunResponse),
    Err(ErrorResponse),
}

impl ServerReply {
    /// Parse a response body and pull out the image payload.
    ///
    /// # Errors
    /// `Json` when the body is not JSON, `Server` for an `{"error": ...}`
    /// body, `MissingResult` for any other JSON value.
    pub fn parse(body: &str) -> Result<String, ProtocolError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| ProtocolError::Json(e.to_string()))?;
        match serde_json::from_value::<ServerReply>(value) {
            Ok(ServerReply::Ok(RunResponse { result })) => Ok(result),
            Ok(ServerReply::Err(ErrorResponse { error })) => Err(ProtocolError::Server(error)),
            Err(_) => Err(ProtocolError::MissingResult),
        }
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(mime: &str, payload: &str) -> String {
    format!("data:{mime};base64,{payload}")
}

pub fn png_data_uri(payload: &str) -> String {
    data_uri(PNG_MIME, payload)
}
