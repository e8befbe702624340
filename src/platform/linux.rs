// /proc-backed metric readers.

use crate::error::ProbeError;
use crate::models::{IfaceByteCounters, PrefixFilter, Probed, ProcessorTopology};
use std::collections::BTreeSet;
use std::path::Path;

const PROC_NET_DEV: &str = "/proc/net/dev";
const PROC_CPUINFO: &str = "/proc/cpuinfo";
const PROC_MEMINFO: &str = "/proc/meminfo";
const PROC_VERSION: &str = "/proc/version";

const KIB_PER_GIB: f64 = 1024.0 * 1024.0;

pub(super) fn read_counters(filter: &PrefixFilter) -> Result<IfaceByteCounters, ProbeError> {
    read_counters_at(PROC_NET_DEV.as_ref(), PROC_NET_DEV, filter)
}

fn read_counters_at(
    path: &Path,
    label: &'static str,
    filter: &PrefixFilter,
) -> Result<IfaceByteCounters, ProbeError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProbeError::Io {
        path: label,
        source,
    })?;
    Ok(parse_net_dev(&content, filter))
}

/// Sums the byte accumulators of the network-device table. The first two
/// lines are column headers; each remaining line is one interface record
/// with the name before a colon and at least 10 numeric fields. Field 1 is
/// the bytes-sent accumulator and field 9 bytes-received; a field that
/// fails to parse counts as zero for that interface. Short or nameless
/// lines are skipped.
fn parse_net_dev(content: &str, filter: &PrefixFilter) -> IfaceByteCounters {
    let mut totals = IfaceByteCounters::default();
    for line in content.lines().skip(2) {
        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() < 10 {
            continue;
        }
        let name = match fields[0].split_once(':') {
            Some((name, _)) => name,
            None => continue,
        };
        if name.is_empty() || filter.excludes(name) {
            continue;
        }
        totals.bytes_sent += fields[1].parse::<u64>().unwrap_or(0);
        totals.bytes_received += fields[9].parse::<u64>().unwrap_or(0);
    }
    totals
}

pub(super) fn probe_cores() -> Probed<ProcessorTopology> {
    let content = match std::fs::read_to_string(PROC_CPUINFO) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, path = PROC_CPUINFO, "cpu topology probe failed");
            return Probed::Defaulted;
        }
    };
    let physical = match parse_cpuinfo_physical(&content) {
        Some(n) => n,
        None => {
            tracing::warn!(path = PROC_CPUINFO, "cpu topology lines missing");
            return Probed::Defaulted;
        }
    };
    let logical = std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(0);
    Probed::Value(ProcessorTopology {
        physical_cores: physical,
        logical_cores: logical,
    })
}

/// Physical core total from /proc/cpuinfo: the first "cpu cores" value is
/// cores per socket, the number of distinct "physical id" values is the
/// socket count, and the total is their product.
fn parse_cpuinfo_physical(content: &str) -> Option<u32> {
    let mut cores_per_socket: Option<u32> = None;
    let mut socket_ids: BTreeSet<&str> = BTreeSet::new();
    for line in content.lines() {
        if line.starts_with("cpu cores") {
            if cores_per_socket.is_none() {
                cores_per_socket = line
                    .split_once(':')
                    .and_then(|(_, v)| v.trim().parse().ok());
            }
        } else if line.starts_with("physical id") {
            if let Some((_, v)) = line.split_once(':') {
                socket_ids.insert(v.trim());
            }
        }
    }
    cores_per_socket.map(|cores| socket_ids.len() as u32 * cores)
}

pub(super) fn probe_total_memory_gib() -> Probed<f64> {
    probe_meminfo_gib("MemTotal:")
}

pub(super) fn probe_available_memory_gib() -> Probed<f64> {
    probe_meminfo_gib("MemAvailable:")
}

fn probe_meminfo_gib(prefix: &'static str) -> Probed<f64> {
    let content = match std::fs::read_to_string(PROC_MEMINFO) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, path = PROC_MEMINFO, "meminfo probe failed");
            return Probed::Defaulted;
        }
    };
    match parse_meminfo_kib(&content, prefix) {
        Some(kib) => Probed::Value(kib as f64 / KIB_PER_GIB),
        None => {
            tracing::warn!(field = prefix, path = PROC_MEMINFO, "meminfo line missing");
            Probed::Defaulted
        }
    }
}

/// Parses the kB value of the meminfo line matching `prefix`.
fn parse_meminfo_kib(content: &str, prefix: &str) -> Option<u64> {
    content
        .lines()
        .find(|l| l.starts_with(prefix))
        .and_then(|l| l[prefix.len()..].split_whitespace().next())
        .and_then(|v| v.parse().ok())
}

pub(super) fn probe_kernel_version() -> Probed<String> {
    let content = match std::fs::read_to_string(PROC_VERSION) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, path = PROC_VERSION, "kernel version probe failed");
            return Probed::Defaulted;
        }
    };
    // "Linux version 6.8.0-45-generic (...)": the release is the third token.
    match content.split_whitespace().nth(2) {
        Some(v) => Probed::Value(v.to_string()),
        None => {
            tracing::warn!(path = PROC_VERSION, "kernel version token missing");
            Probed::Defaulted
        }
    }
}
