//! View models for the dashboard and network pages.
//!
//! Each builder takes explicit inputs (dataset, filter state, weighting
//! mode) and returns a plain data structure the presentation layer can
//! render; failures of optional inputs degrade into [`Notice`]s carried
//! on the view instead of aborting the build.

pub mod dashboard;
pub mod filter;
pub mod html;
pub mod network;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal message to surface in place of (or alongside) a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "severity", content = "message")]
pub enum Notice {
    /// The section's data is unavailable; the rest of the page renders.
    Warning(String),
    /// A named artifact is missing or malformed.
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Warning(msg) => write!(f, "warning: {}", msg),
            Notice::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}
