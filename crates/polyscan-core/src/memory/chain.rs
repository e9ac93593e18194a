use tracing::trace;

use crate::memory::ReadMemory;

/// Resolve `base` through a pointer chain.
///
/// Each offset costs one dereference: read the pointer at the current address,
/// then add the offset. The last offset is added but not dereferenced, so the
/// result points *at* the terminal field. Any failed read yields 0 and the
/// remaining offsets are not visited.
pub fn resolve_chain<R: ReadMemory + ?Sized>(reader: &R, base: u64, offsets: &[u64]) -> u64 {
    let mut address = base;
    for (hop, &offset) in offsets.iter().enumerate() {
        match reader.read_u64(address) {
            Ok(pointer) => address = pointer.wrapping_add(offset),
            Err(e) => {
                trace!(
                    "chain from 0x{:X} broke at hop {} (0x{:X}): {}",
                    base, hop, address, e
                );
                return 0;
            }
        }
    }
    address
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_empty_chain_returns_base() {
        let reader = MockMemoryBuilder::new().build();
        assert_eq!(resolve_chain(&reader, 0x1234, &[]), 0x1234);
        assert_eq!(reader.read_count(), 0);
    }

    #[test]
    fn test_chain_reads_once_per_offset() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x1000, 0x2000)
            .write_u64(0x2010, 0x3000)
            .write_u64(0x3020, 0x4000)
            .build();

        let resolved = resolve_chain(&reader, 0x1000, &[0x10, 0x20, 0x30]);
        assert_eq!(resolved, 0x4030);
        assert_eq!(reader.read_count(), 3);
    }

    #[test]
    fn test_last_offset_is_not_dereferenced() {
        // Nothing is mapped at 0x2008, so dereferencing it would fail.
        let reader = MockMemoryBuilder::new().write_u64(0x1000, 0x2000).build();
        assert_eq!(resolve_chain(&reader, 0x1000, &[0x8]), 0x2008);
    }

    #[test]
    fn test_failed_hop_short_circuits() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x1000, 0x2000)
            .build();

        assert_eq!(resolve_chain(&reader, 0x1000, &[0x10, 0x20, 0x30]), 0);
        // First hop ok, second fails, third never attempted
        assert_eq!(reader.read_count(), 2);
    }

    #[test]
    fn test_null_pointer_is_never_dereferenced() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x1000, 0)
            .write_u64(0x10, 0x5000)
            .build();

        // 0 + 0x10 is mapped in the mock, but the chain must stop at the
        // null pointer.
        assert_eq!(resolve_chain(&reader, 0x1000, &[0x0, 0x10, 0x0]), 0);
        assert_eq!(resolve_chain(&reader, 0, &[0x10]), 0);
    }

    #[test]
    fn test_resolve_via_trait() {
        let reader = MockMemoryBuilder::new().write_u64(0x1000, 0x2000).build();
        assert_eq!(reader.resolve(0x1000, &[0x18]), 0x2018);
    }
}
