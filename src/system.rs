//! Host system snapshot attached to annotated functions.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Immutable record of host facts, captured once per process.
///
/// Sub-facts that cannot be read are recorded as `"unknown"`; collection
/// itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Operating system name, e.g. `linux`
    pub os: String,
    /// Kernel or OS release string
    pub version: String,
    /// Machine architecture, e.g. `x86_64`
    pub arch: String,
    /// Compiler identity the binary was built with
    pub runtime: String,
}

static SNAPSHOT: OnceLock<SystemSnapshot> = OnceLock::new();

/// Capture the host snapshot, reusing the process-wide copy after the
/// first call.
pub fn snapshot() -> SystemSnapshot {
    SNAPSHOT.get_or_init(collect).clone()
}

fn collect() -> SystemSnapshot {
    SystemSnapshot {
        os: std::env::consts::OS.to_string(),
        version: os_release(),
        arch: std::env::consts::ARCH.to_string(),
        runtime: option_env!("DIO_RUSTC_VERSION")
            .unwrap_or("rustc (unknown)")
            .to_string(),
    }
}

#[cfg(target_os = "linux")]
fn os_release() -> String {
    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| uname_release())
}

#[cfg(not(target_os = "linux"))]
fn os_release() -> String {
    uname_release()
}

fn uname_release() -> String {
    std::process::Command::new("uname")
        .arg("-r")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
