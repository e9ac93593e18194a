//! Pointer-chain tracing for checking section offsets against a new build
//! of the target.

use serde::Serialize;

use crate::extract::Section;
use crate::memory::ReadMemory;

/// One dereference in a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainHop {
    /// Address that was read
    pub address: u64,
    pub offset: u64,
    /// Pointer found there, `None` if the read failed
    pub value: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainTrace {
    pub start: u64,
    pub hops: Vec<ChainHop>,
    /// Final address, 0 when a hop failed
    pub resolved: u64,
}

impl ChainTrace {
    pub fn is_resolved(&self) -> bool {
        self.resolved != 0
    }

    /// Index of the hop that failed
    pub fn broken_at(&self) -> Option<usize> {
        self.hops.iter().position(|hop| hop.value.is_none())
    }
}

/// Resolve a chain the same way as [`crate::memory::resolve_chain`], keeping
/// every intermediate address.
pub fn trace_chain<R: ReadMemory + ?Sized>(reader: &R, start: u64, offsets: &[u64]) -> ChainTrace {
    let mut hops = Vec::with_capacity(offsets.len());
    let mut address = start;

    for &offset in offsets {
        match reader.read_u64(address) {
            Ok(pointer) => {
                hops.push(ChainHop {
                    address,
                    offset,
                    value: Some(pointer),
                });
                address = pointer.wrapping_add(offset);
            }
            Err(_) => {
                hops.push(ChainHop {
                    address,
                    offset,
                    value: None,
                });
                return ChainTrace {
                    start,
                    hops,
                    resolved: 0,
                };
            }
        }
    }

    ChainTrace {
        start,
        hops,
        resolved: address,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTrace {
    pub section: Section,
    pub module_offset: u64,
    pub trace: ChainTrace,
}

/// Trace every section chain from the module base
pub fn trace_sections<R: ReadMemory + ?Sized>(reader: &R) -> Vec<SectionTrace> {
    Section::ALL
        .iter()
        .map(|&section| {
            let path = section.path();
            let start = reader.base_address().wrapping_add(path.module_offset);
            SectionTrace {
                section,
                module_offset: path.module_offset,
                trace: trace_chain(reader, start, path.chain),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MockMemoryBuilder, resolve_chain};

    #[test]
    fn test_trace_matches_resolve() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x1000, 0x2000)
            .write_u64(0x2010, 0x3000)
            .build();

        let trace = trace_chain(&reader, 0x1000, &[0x10, 0x8]);
        assert_eq!(trace.resolved, resolve_chain(&reader, 0x1000, &[0x10, 0x8]));
        assert_eq!(trace.resolved, 0x3008);
        assert_eq!(trace.hops.len(), 2);
        assert_eq!(trace.hops[1].address, 0x2010);
        assert_eq!(trace.broken_at(), None);
    }

    #[test]
    fn test_trace_records_failed_hop() {
        let reader = MockMemoryBuilder::new().write_u64(0x1000, 0x2000).build();

        let trace = trace_chain(&reader, 0x1000, &[0x10, 0x8, 0x4]);
        assert!(!trace.is_resolved());
        assert_eq!(trace.broken_at(), Some(1));
        assert_eq!(trace.hops.len(), 2);
    }

    #[test]
    fn test_trace_sections_covers_all() {
        let reader = MockMemoryBuilder::new().base_address(0x40_0000).build();
        let traces = trace_sections(&reader);
        assert_eq!(traces.len(), Section::ALL.len());
        assert!(traces.iter().all(|t| !t.trace.is_resolved()));
        assert_eq!(traces[0].trace.start, 0x40_0000 + 0x02BE_5F28);
    }
}
