// Fallback backend for platforms without a native reader.

use crate::error::ProbeError;
use crate::models::{IfaceByteCounters, PrefixFilter, Probed, ProcessorTopology};

pub(super) fn read_counters(_filter: &PrefixFilter) -> Result<IfaceByteCounters, ProbeError> {
    Err(ProbeError::Unsupported)
}

pub(super) fn probe_cores() -> Probed<ProcessorTopology> {
    Probed::Defaulted
}

pub(super) fn probe_total_memory_gib() -> Probed<f64> {
    Probed::Defaulted
}

pub(super) fn probe_available_memory_gib() -> Probed<f64> {
    Probed::Defaulted
}

pub(super) fn probe_kernel_version() -> Probed<String> {
    Probed::Defaulted
}
