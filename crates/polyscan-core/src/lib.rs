//! # polyscan-core
//!
//! Reads live game state out of a running Polytopia process.
//!
//! This crate provides:
//! - Remote memory access on Linux (`/proc` maps lookup, `process_vm_readv`)
//! - Pointer-chain resolution and a typed layout of the game's objects
//! - Decoders for the managed lists, strings and dictionaries of the target
//! - Extraction of tribes, tiles, structures, cities, resources and units
//! - Serialization of a snapshot as delimited text, a summary line or JSON
//!
//! ## Feature Flags
//!
//! - `debug-tools`: Enables pointer-chain tracing for checking section offsets.
//!   This feature is intended for CLI tools and development, not production use.

pub mod command;
pub mod config;
#[cfg(feature = "debug-tools")]
pub mod debug;
pub mod decode;
pub mod error;
pub mod export;
pub mod extract;
pub mod game;
pub mod memory;

pub use command::{Command, CommandKind, CommandSink, LoggingSink};
pub use config::{PacingConfig, ScanConfig, ScanConfigBuilder};
pub use error::{Error, Result};
pub use export::{
    JsonExporter, OutputFormat, SnapshotFormat, SummaryExporter, TextExporter, format_snapshot,
    format_summary,
};
pub use extract::{Extractor, HolePolicy, Section, SectionBases, Snapshot};
pub use game::{City, Relation, RelationSlot, Resource, Structure, Task, Tile, Tribe, Unit};
pub use memory::{
    JitteredPacing, MemoryReader, NoPacing, ProcessHandle, ReadMemory, ReadPacing, resolve_chain,
};

// Debug utilities (requires debug-tools feature)
#[cfg(feature = "debug-tools")]
pub use debug::{ChainHop, ChainTrace, SectionTrace, trace_chain, trace_sections};
