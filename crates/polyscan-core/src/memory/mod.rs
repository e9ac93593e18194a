mod chain;
pub mod layout;
mod pacing;
mod process;
mod reader;

// Mock memory reader for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use chain::resolve_chain;
pub use pacing::{JitteredPacing, NoPacing, ReadPacing};
pub use process::*;
pub use reader::{MemoryReader, Primitive, ReadMemory};

// Re-export mock for convenient access in tests
#[doc(hidden)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
