//! Lint diagnostics for submitted parameters.
//!
//! Reports problems the server would trip over without modifying the values.
//! The form only consults these in strict mode; by default values are sent
//! exactly as typed.

use crate::algorithm::Algorithm;
use crate::params::ParameterValues;
use crate::schema::schema_for;

/// Width and height of the server's raster, in cells.
pub const CANVAS_SIZE: i64 = 50;

// ─── Diagnostic types ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// The server will reject or misdraw this run.
    Warning,
    /// Legal, but likely not what the user meant.
    Info,
}

/// A single finding for one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDiagnostic {
    pub field: String,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "not-integer", "negative-radius").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all rules over `values` for `algorithm`.
#[must_use]
pub fn lint_parameters(algorithm: Algorithm, values: &ParameterValues) -> Vec<ParamDiagnostic> {
    let mut diags = Vec::new();
    lint_schema_fields(algorithm, values, &mut diags);
    lint_integers(algorithm, values, &mut diags);
    lint_radius(values, &mut diags);
    lint_canvas_bounds(algorithm, values, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_schema_fields(
    algorithm: Algorithm,
    values: &ParameterValues,
    diags: &mut Vec<ParamDiagnostic>,
) {
    let schema = schema_for(algorithm);
    for field in schema {
        if !values.contains(field.id) {
            diags.push(ParamDiagnostic {
                field: field.id.to_string(),
                message: format!(
                    "`{algorithm}` needs `{}` but the form has no such input.",
                    field.id
                ),
                severity: LintSeverity::Warning,
                rule: "missing-field",
            });
        }
    }
    for id in values.ids() {
        if !schema.iter().any(|f| f.id == id) {
            diags.push(ParamDiagnostic {
                field: id.to_string(),
                message: format!("`{id}` is not a parameter of `{algorithm}`."),
                severity: LintSeverity::Warning,
                rule: "unknown-field",
            });
        }
    }
}

fn lint_integers(
    algorithm: Algorithm,
    values: &ParameterValues,
    diags: &mut Vec<ParamDiagnostic>,
) {
    for field in schema_for(algorithm) {
        let Some(raw) = values.get(field.id) else {
            continue;
        };
        if parse_integer(raw).is_none() {
            diags.push(ParamDiagnostic {
                field: field.id.to_string(),
                message: format!("`{}` must be a whole number, got {raw:?}.", field.id),
                severity: LintSeverity::Warning,
                rule: "not-integer",
            });
        }
    }
}

fn lint_radius(values: &ParameterValues, diags: &mut Vec<ParamDiagnostic>) {
    if let Some(r) = values.get("radius").and_then(parse_integer)
        && r < 0
    {
        diags.push(ParamDiagnostic {
            field: "radius".to_string(),
            message: format!("Radius {r} is negative."),
            severity: LintSeverity::Warning,
            rule: "negative-radius",
        });
    }
}

/// Points off the raster are clipped server-side; flag them as a hint.
fn lint_canvas_bounds(
    algorithm: Algorithm,
    values: &ParameterValues,
    diags: &mut Vec<ParamDiagnostic>,
) {
    for field in schema_for(algorithm).iter().filter(|f| f.id != "radius") {
        if let Some(v) = values.get(field.id).and_then(parse_integer)
            && !(0..CANVAS_SIZE).contains(&v)
        {
            diags.push(ParamDiagnostic {
                field: field.id.to_string(),
                message: format!(
                    "`{}` = {v} lies outside the {CANVAS_SIZE}×{CANVAS_SIZE} canvas.",
                    field.id
                ),
                severity: LintSeverity::Info,
                rule: "out-of-canvas",
            });
        }
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

// ─── Tests ────────────────────────────────────────────────────────────────
