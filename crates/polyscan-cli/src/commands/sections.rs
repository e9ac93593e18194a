//! Section chain tracing.
//!
//! Prints every hop of the four section chains so a broken offset after a
//! game update can be located.

use anyhow::Result;
use polyscan_core::{MemoryReader, ProcessHandle, ScanConfig, trace_sections};

pub fn run(process: &ProcessHandle, config: &ScanConfig, json: bool) -> Result<()> {
    let reader = MemoryReader::with_pacing(process, config.build_pacing());
    let traces = trace_sections(&reader);

    if json {
        println!("{}", serde_json::to_string_pretty(&traces)?);
        return Ok(());
    }

    for section in &traces {
        let status = if section.trace.is_resolved() {
            "OK"
        } else {
            "BROKEN"
        };
        println!(
            "{:<6} {}+0x{:X} -> 0x{:X} [{}]",
            section.section,
            config.module_name,
            section.module_offset,
            section.trace.resolved,
            status
        );

        for (i, hop) in section.trace.hops.iter().enumerate() {
            match hop.value {
                Some(value) => println!(
                    "  [{}] *0x{:X} = 0x{:X} (+0x{:X})",
                    i, hop.address, value, hop.offset
                ),
                None => println!("  [{}] *0x{:X} unreadable", i, hop.address),
            }
        }
    }

    Ok(())
}
