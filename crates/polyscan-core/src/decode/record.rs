use crate::error::Result;
use crate::memory::ReadMemory;
use crate::memory::layout::{Field, RecordLayout, Width};

/// Bytes of one fixed-layout window of a managed object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    layout: RecordLayout,
    bytes: Vec<u8>,
}

impl RawRecord {
    /// Wrap bytes read for `layout`
    pub fn from_bytes(layout: RecordLayout, bytes: Vec<u8>) -> Self {
        Self { layout, bytes }
    }

    /// All-zero record, the stand-in when the window could not be read
    pub fn zeroed(layout: RecordLayout) -> Self {
        Self {
            layout,
            bytes: vec![0; layout.size],
        }
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Raw value of `field`, or `None` if it lies outside the window
    pub fn get(&self, field: Field) -> Option<u64> {
        let start = usize::try_from(field.offset.checked_sub(self.layout.start)?).ok()?;
        let bytes = self.bytes.get(start..start + field.width.size())?;

        Some(match field.width {
            Width::U8 | Width::Bool => bytes[0] as u64,
            Width::U16 => u16::from_ne_bytes([bytes[0], bytes[1]]) as u64,
            Width::U64 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(bytes);
                u64::from_ne_bytes(raw)
            }
        })
    }

    pub fn u8(&self, field: Field) -> u8 {
        self.get(field).unwrap_or(0) as u8
    }

    pub fn u16(&self, field: Field) -> u16 {
        self.get(field).unwrap_or(0) as u16
    }

    pub fn u64(&self, field: Field) -> u64 {
        self.get(field).unwrap_or(0)
    }

    /// Non-zero is true, whatever the field width
    pub fn flag(&self, field: Field) -> bool {
        self.get(field).unwrap_or(0) != 0
    }
}

/// Read the `layout` window of the object whose window starts at `address`
pub fn read_record<R: ReadMemory>(
    reader: &R,
    address: u64,
    layout: RecordLayout,
) -> Result<RawRecord> {
    let bytes = reader.read_bytes(address, layout.size)?;
    Ok(RawRecord::from_bytes(layout, bytes))
}
