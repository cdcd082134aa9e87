//! Rasterization algorithms offered by the parameter form.
//!
//! The wire name of each variant is what the `<select id="algorithm">`
//! control carries and what the server dispatches on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A selectable rasterization algorithm.
///
/// The empty / "unselected" state of the select control has no variant:
/// it is modeled as `Option::<Algorithm>::None` by [`Algorithm::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    StepByStep,
    Dda,
    BresenhamLine,
    BresenhamCircle,
}

/// The geometric primitive an algorithm draws. Decides the parameter schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Line,
    Circle,
}

impl Algorithm {
    /// All algorithms, in select-control order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::StepByStep,
        Algorithm::Dda,
        Algorithm::BresenhamLine,
        Algorithm::BresenhamCircle,
    ];

    /// Resolve a select-control value. Empty and unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "step_by_step" => Some(Algorithm::StepByStep),
            "dda" => Some(Algorithm::Dda),
            "bresenham_line" => Some(Algorithm::BresenhamLine),
            "bresenham_circle" => Some(Algorithm::BresenhamCircle),
            _ => None,
        }
    }

    /// The wire name sent to the server.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::StepByStep => "step_by_step",
            Algorithm::Dda => "dda",
            Algorithm::BresenhamLine => "bresenham_line",
            Algorithm::BresenhamCircle => "bresenham_circle",
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Algorithm::StepByStep | Algorithm::Dda | Algorithm::BresenhamLine => Shape::Line,
            Algorithm::BresenhamCircle => Shape::Circle,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Algorithm::from_str`] for names outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::from_name(s).ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}
