use tracing::debug;

use crate::memory::ReadMemory;
use crate::memory::layout::{Width, collection};

/// Shape of a homogeneous managed list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    /// Distance between elements in the backing array
    pub stride: usize,
    /// Meaningful prefix of each element
    pub width: Width,
    /// Upper bound on elements read, whatever the target reports
    pub cap: usize,
}

impl ListLayout {
    /// Single-byte elements (owner ids), capped at `cap`
    pub const fn bytes(cap: usize) -> Self {
        Self {
            stride: BYTE_LIST_STRIDE,
            width: Width::U8,
            cap,
        }
    }
}

/// Enum-valued `List<T>`: 4-byte slots, low 16 bits meaningful
pub const VALUE_LIST: ListLayout = ListLayout {
    stride: 4,
    width: Width::U16,
    cap: 100,
};

pub const BYTE_LIST_STRIDE: usize = 1;

/// Decode the list whose pointer lives at `handle`.
///
/// Unreadable, empty or unresolvable lists all decode to an empty vector.
pub fn read_list<R: ReadMemory>(reader: &R, handle: u64, layout: ListLayout) -> Vec<u16> {
    let count = match reader.read_u16(reader.resolve(handle, collection::COUNT)) {
        Ok(count) => count as usize,
        Err(_) => return Vec::new(),
    };

    let len = count.min(layout.cap);
    if len < count {
        debug!("list at 0x{:X} clamped from {} to {}", handle, count, len);
    }
    if len == 0 {
        return Vec::new();
    }

    let items = reader.resolve(handle, collection::ITEMS);
    if items == 0 {
        return Vec::new();
    }

    let Ok(buffer) = reader.read_bytes(items, len * layout.stride) else {
        debug!("list items at 0x{:X} unreadable", items);
        return Vec::new();
    };

    buffer
        .chunks_exact(layout.stride)
        .map(|element| match layout.width {
            Width::U16 | Width::U64 => u16::from_ne_bytes([element[0], element[1]]),
            Width::U8 | Width::Bool => element[0] as u16,
        })
        .collect()
}

/// `&`-joined decimal values, empty for an empty list
pub fn join_values(values: &[u16]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("&")
}
