use crate::error::Result;
use crate::export::SnapshotFormat;
use crate::extract::Snapshot;

/// One-line human summary
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryExporter;

impl SnapshotFormat for SummaryExporter {
    fn render(&self, snapshot: &Snapshot) -> Result<String> {
        Ok(format_summary(snapshot))
    }
}

/// Counts here are the ones the target reported, not the number extracted
pub fn format_summary(snapshot: &Snapshot) -> String {
    format!(
        "Turn: {} | Map size: {}x{} ({}) | Units: {} | Tribes: {}",
        snapshot.turn,
        snapshot.map_size,
        snapshot.map_size,
        snapshot.tile_count,
        snapshot.unit_count,
        snapshot.tribe_count
    )
}
