use crate::error::Result;
use crate::export::SnapshotFormat;
use crate::extract::Snapshot;

/// Pretty-printed JSON of the whole snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl SnapshotFormat for JsonExporter {
    fn render(&self, snapshot: &Snapshot) -> Result<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }
}
