pub mod algorithm;
pub mod lint;
pub mod params;
pub mod protocol;
pub mod schema;

pub use algorithm::{Algorithm, Shape, UnknownAlgorithm};
pub use lint::{LintSeverity, ParamDiagnostic, lint_parameters};
pub use params::{AlgorithmParams, CircleParams, LineParams, ParamError, ParameterValues};
pub use protocol::{
    ErrorResponse, JSON_CONTENT_TYPE, ProtocolError, RUN_ENDPOINT, RunRequest, RunResponse,
    ServerReply, data_uri, png_data_uri,
};
pub use schema::{FieldDescriptor, default_values, schema_for, schema_for_name};
