// Domain models for the host metrics monitor.

use serde::{Deserialize, Serialize};

/// Upload/download rates in kilobytes per second, computed by one sampling
/// cycle. Always replaced as a whole pair; readers never see fields from
/// two different cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthSnapshot {
    pub upload_kbps: f64,
    pub download_kbps: f64,
}

/// Cumulative byte totals summed across all included interfaces at one
/// instant. Monotonically non-decreasing until a counter wraps or an
/// interface resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfaceByteCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorTopology {
    pub physical_cores: u32,
    pub logical_cores: u32,
}

/// Interface-name exclusion list. Case-sensitive starts-with matching,
/// no globbing.
#[derive(Debug, Clone, Default)]
pub struct PrefixFilter {
    prefixes: Vec<String>,
}

impl PrefixFilter {
    /// Builds a filter from a comma-separated list (e.g. "lo,docker,veth").
    /// Empty entries are dropped, so an empty string excludes nothing.
    pub fn from_comma_list(list: &str) -> Self {
        Self {
            prefixes: list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn excludes(&self, interface_name: &str) -> bool {
        self.prefixes
            .iter()
            .any(|p| interface_name.starts_with(p.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// Outcome of a best-effort probe: a real value, or the type's zero
/// default after a failed read. Public getters collapse both to the value;
/// callers that care (tests, diagnostics) can still tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probed<T> {
    Value(T),
    Defaulted,
}

impl<T: Default> Probed<T> {
    pub fn into_value(self) -> T {
        match self {
            Probed::Value(v) => v,
            Probed::Defaulted => T::default(),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Probed::Defaulted)
    }
}
