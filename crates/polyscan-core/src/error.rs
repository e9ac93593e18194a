use thiserror::Error;

use crate::extract::Section;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Module {module} not mapped in process {pid}")]
    ModuleNotFound { pid: i32, module: String },

    #[error("Refusing to read from null address")]
    NullAddress,

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Could not resolve the {0} section base")]
    SectionUnresolved(Section),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Status reported to the caller of a scan.
    ///
    /// An unresolvable section base is the only failure that aborts a whole
    /// pass and gets its own negative status; everything else is a generic 1.
    pub fn status_code(&self) -> i32 {
        match self {
            Error::SectionUnresolved(_) => -1,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
