//! Parameter schema: which labeled inputs each algorithm renders.
//!
//! All line algorithms share one four-field schema; the circle algorithm
//! has its own three-field schema. Order here is render order.

use crate::algorithm::{Algorithm, Shape};
use crate::params::ParameterValues;

/// One labeled input in the parameter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// DOM id of the input, also the key in the submitted parameter map.
    pub id: &'static str,
    pub label: &'static str,
    /// HTML `type` attribute of the input.
    pub input_type: &'static str,
    pub default_value: &'static str,
}

impl FieldDescriptor {
    const fn number(id: &'static str, label: &'static str, default_value: &'static str) -> Self {
        Self {
            id,
            label,
            input_type: "number",
            default_value,
        }
    }
}

/// Endpoints of a line segment.
pub const LINE_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::number("x1", "X1:", "5"),
    FieldDescriptor::number("y1", "Y1:", "5"),
    FieldDescriptor::number("x2", "X2:", "45"),
    FieldDescriptor::number("y2", "Y2:", "45"),
];

/// Center and radius of a circle.
pub const CIRCLE_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::number("xc", "X center:", "25"),
    FieldDescriptor::number("yc", "Y center:", "25"),
    FieldDescriptor::number("radius", "Radius:", "20"),
];

/// Field descriptors for an algorithm, in render order.
pub fn schema_for(algorithm: Algorithm) -> &'static [FieldDescriptor] {
    match algorithm.shape() {
        Shape::Line => &LINE_FIELDS,
        Shape::Circle => &CIRCLE_FIELDS,
    }
}

/// Like [`schema_for`], but keyed by select-control value.
/// Unknown or empty names have no fields.
pub fn schema_for_name(name: &str) -> &'static [FieldDescriptor] {
    match Algorithm::from_name(name) {
        Some(algorithm) => schema_for(algorithm),
        None => &[],
    }
}

/// The values a freshly rendered form holds before any edits.
pub fn default_values(algorithm: Algorithm) -> ParameterValues {
    schema_for(algorithm)
        .iter()
        .map(|f| (f.id, f.default_value))
        .collect()
}
