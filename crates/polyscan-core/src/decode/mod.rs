//! Decoders for the target's in-memory data structures.
//!
//! Everything here is built on [`ReadMemory`](crate::memory::ReadMemory) and
//! degrades to an empty value instead of failing: the target is read
//! without its cooperation, so any pointer may be stale by the time it is
//! followed.

mod list;
mod record;
mod relations;
mod string;

pub use list::{BYTE_LIST_STRIDE, ListLayout, VALUE_LIST, join_values, read_list};
pub use record::{RawRecord, read_record};
pub use relations::read_relation_slots;
pub use string::{decode_utf16_units, read_string};
