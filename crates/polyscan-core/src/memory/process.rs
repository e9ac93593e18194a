//! Target process discovery on Linux.
//!
//! The module base is the start of the first mapping in `/proc/<pid>/maps`
//! whose line mentions the module token. Under Wine/Proton the game's
//! `GameAssembly.dll` shows up there like any other mapped file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Module token of the IL2CPP game image
pub const DEFAULT_MODULE_NAME: &str = "GameAssembly.dll";

/// Process name the game runs under
pub const DEFAULT_PROCESS_NAME: &str = "Polytopia.exe";

/// Kernel limit on `/proc/<pid>/comm` length (without the newline)
const COMM_MAX_LEN: usize = 15;

/// An opened target process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: i32,
    pub base_address: u64,
    pub module_name: String,
}

impl ProcessHandle {
    /// Locate `module_name` inside process `pid`
    pub fn open(pid: i32, module_name: &str) -> Result<Self> {
        let maps_path = format!("/proc/{}/maps", pid);
        let maps = fs::read_to_string(&maps_path)
            .map_err(|e| Error::ProcessNotFound(format!("pid {} ({})", pid, e)))?;

        let base_address =
            module_base_from_maps(&maps, module_name).ok_or_else(|| Error::ModuleNotFound {
                pid,
                module: module_name.to_string(),
            })?;

        debug!(
            "Module {} mapped at 0x{:X} in pid {}",
            module_name, base_address, pid
        );

        Ok(Self {
            pid,
            base_address,
            module_name: module_name.to_string(),
        })
    }

    /// Find a process by name, then open it
    pub fn find_and_open(process_name: &str, module_name: &str) -> Result<Self> {
        let pid = find_pid_by_name(process_name)?;
        Self::open(pid, module_name)
    }
}

/// Start address of the first mapping whose line contains `module_name`
pub fn module_base_from_maps(maps: &str, module_name: &str) -> Option<u64> {
    maps.lines()
        .filter(|line| line.contains(module_name))
        .find_map(|line| {
            let start = line.split('-').next()?;
            u64::from_str_radix(start.trim(), 16).ok()
        })
}

/// Scan `/proc` for a process whose `comm` matches `name`
pub fn find_pid_by_name(name: &str) -> Result<i32> {
    for entry in fs::read_dir("/proc")? {
        let Ok(entry) = entry else { continue };
        let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|s| s.parse::<i32>().ok())
        else {
            continue;
        };

        let comm_path = Path::new("/proc").join(pid.to_string()).join("comm");
        if let Ok(comm) = fs::read_to_string(comm_path) {
            if comm_matches(comm.trim_end(), name) {
                return Ok(pid);
            }
        }
    }

    Err(Error::ProcessNotFound(name.to_string()))
}

/// The kernel truncates `comm`, so a full-length comm matches any name it prefixes
fn comm_matches(comm: &str, name: &str) -> bool {
    comm == name || (comm.len() == COMM_MAX_LEN && name.starts_with(comm))
}
