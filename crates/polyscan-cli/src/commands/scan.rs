//! Snapshot extraction command.

use std::io::Write;

use anyhow::Result;
use polyscan_core::{Extractor, MemoryReader, OutputFormat, ProcessHandle, ScanConfig};

/// Run one extraction pass and write it to stdout
pub fn run(process: &ProcessHandle, config: &ScanConfig, format: OutputFormat) -> Result<()> {
    let reader = MemoryReader::with_pacing(process, config.build_pacing());
    let snapshot = Extractor::new(&reader)
        .with_hole_policy(config.hole_policy)
        .extract()?;

    let output = format.exporter().render(&snapshot)?;

    let mut stdout = std::io::stdout().lock();
    match format {
        // consumed byte-for-byte, no trailing newline
        OutputFormat::Text => write!(stdout, "{}", output)?,
        OutputFormat::Summary | OutputFormat::Json => writeln!(stdout, "{}", output)?,
    }
    stdout.flush()?;

    Ok(())
}
