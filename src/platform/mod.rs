// Platform metric sources: one backend per OS behind a shared surface.

pub mod win_tables;

#[cfg(target_os = "linux")]
#[path = "linux.rs"]
mod backend;

#[cfg(windows)]
#[path = "windows.rs"]
mod backend;

#[cfg(not(any(target_os = "linux", windows)))]
#[path = "other.rs"]
mod backend;

use crate::error::ProbeError;
use crate::models::{IfaceByteCounters, PrefixFilter, Probed, ProcessorTopology};

/// Cumulative bytes sent/received summed across all interfaces not excluded
/// by `filter`. Propagates OS query failures so a failed read is never
/// mistaken for zero traffic.
pub fn read_counters(filter: &PrefixFilter) -> Result<IfaceByteCounters, ProbeError> {
    backend::read_counters(filter)
}

/// Physical/logical core counts, `Defaulted` when the probe fails.
pub fn probe_cores() -> Probed<ProcessorTopology> {
    backend::probe_cores()
}

pub fn probe_total_memory_gib() -> Probed<f64> {
    backend::probe_total_memory_gib()
}

pub fn probe_available_memory_gib() -> Probed<f64> {
    backend::probe_available_memory_gib()
}

pub fn probe_kernel_version() -> Probed<String> {
    backend::probe_kernel_version()
}

// Collapsed accessors: advisory metrics read as zero/empty on failure
// rather than erroring past the public surface.

pub fn count_cores() -> ProcessorTopology {
    probe_cores().into_value()
}

pub fn total_memory_gib() -> f64 {
    probe_total_memory_gib().into_value()
}

pub fn available_memory_gib() -> f64 {
    probe_available_memory_gib().into_value()
}

pub fn kernel_version() -> String {
    probe_kernel_version().into_value()
}
