//! Snapshot output formats.

mod json;
mod summary;
mod text;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;
use crate::extract::Snapshot;

pub use json::JsonExporter;
pub use summary::{SummaryExporter, format_summary};
pub use text::{TextExporter, format_snapshot};

/// Trait for snapshot output formats
pub trait SnapshotFormat {
    /// Render a whole snapshot
    fn render(&self, snapshot: &Snapshot) -> Result<String>;
}

/// Output format selectable from the command line or config
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text for the AI driver
    Text,
    /// One human-readable line
    #[default]
    Summary,
    /// Pretty JSON for debugging
    Json,
}

impl OutputFormat {
    pub fn exporter(self) -> Box<dyn SnapshotFormat> {
        match self {
            OutputFormat::Text => Box::new(TextExporter),
            OutputFormat::Summary => Box::new(SummaryExporter),
            OutputFormat::Json => Box::new(JsonExporter),
        }
    }
}
