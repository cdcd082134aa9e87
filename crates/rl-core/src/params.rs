//! Parameter values collected from the form.
//!
//! [`ParameterValues`] is the flat id → string map that goes over the wire.
//! [`AlgorithmParams`] is the typed record checked against the schema, so
//! what is submitted is exactly what the schema declares.

use crate::algorithm::{Algorithm, Shape};
use crate::schema::schema_for;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

// ─── ParameterValues ─────────────────────────────────────────────────────

/// Insertion-ordered map of input id → raw input value.
///
/// Values are never parsed here; numeric interpretation belongs to the server.
/// The largest schema has four fields, so the common case stays inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValues {
    entries: SmallVec<[(String, String); 4]>,
}

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `id` to `value`. A repeated id keeps its first position and takes
    /// the newest value.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, v)) => *v = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = ParameterValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

impl Serialize for ParameterValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParameterValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValuesVisitor;

        impl<'de> Visitor<'de> for ValuesVisitor {
            type Value = ParameterValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of string parameter values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut values = ParameterValues::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    values.insert(k, v);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(ValuesVisitor)
    }
}

// ─── Typed records ───────────────────────────────────────────────────────

/// Why a [`ParameterValues`] map does not fit an algorithm's schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("`{algorithm}` requires parameter `{field}`")]
    MissingField {
        algorithm: Algorithm,
        field: &'static str,
    },
    #[error("`{algorithm}` has no parameter `{field}`")]
    UnknownField { algorithm: Algorithm, field: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParams {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleParams {
    pub xc: String,
    pub yc: String,
    pub radius: String,
}

/// Parameters of a run, shaped by the algorithm's primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParams {
    Line(LineParams),
    Circle(CircleParams),
}

impl AlgorithmParams {
    /// Check `values` against the schema of `algorithm` and build the record.
    ///
    /// # Errors
    /// `MissingField` for the first schema field absent from `values`,
    /// `UnknownField` for the first id the schema does not declare.
    pub fn from_values(
        algorithm: Algorithm,
        values: &ParameterValues,
    ) -> Result<Self, ParamError> {
        let schema = schema_for(algorithm);
        if let Some(extra) = values.ids().find(|id| !schema.iter().any(|f| f.id == *id)) {
            return Err(ParamError::UnknownField {
                algorithm,
                field: extra.to_string(),
            });
        }
        let take = |field: &'static str| -> Result<String, ParamError> {
            values
                .get(field)
                .map(str::to_string)
                .ok_or(ParamError::MissingField { algorithm, field })
        };
        Ok(match algorithm.shape() {
            Shape::Line => AlgorithmParams::Line(LineParams {
                x1: take("x1")?,
                y1: take("y1")?,
                x2: take("x2")?,
                y2: take("y2")?,
            }),
            Shape::Circle => AlgorithmParams::Circle(CircleParams {
                xc: take("xc")?,
                yc: take("yc")?,
                radius: take("radius")?,
            }),
        })
    }

    pub fn shape(&self) -> Shape {
        match self {
            AlgorithmParams::Line(_) => Shape::Line,
            AlgorithmParams::Circle(_) => Shape::Circle,
        }
    }

    /// Flatten back into the wire map, in schema order.
    pub fn to_values(&self) -> ParameterValues {
        let mut values = ParameterValues::new();
        match self {
            AlgorithmParams::Line(p) => {
                values.insert("x1", p.x1.as_str());
                values.insert("y1", p.y1.as_str());
                values.insert("x2", p.x2.as_str());
                values.insert("y2", p.y2.as_str());
            }
            AlgorithmParams::Circle(p) => {
                values.insert("xc", p.xc.as_str());
                values.insert("yc", p.yc.as_str());
                values.insert("radius", p.radius.as_str());
            }
        }
        values
    }
}
