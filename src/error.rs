use thiserror::Error;

/// Failures from the platform metric backends.
///
/// Counter reads fail loud: a failed read must not masquerade as zero
/// traffic. Advisory probes (topology, memory, kernel version) never
/// surface these; they degrade to `Probed::Defaulted` instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("reading {path}: {source}")]
    Io {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{call} returned status {code}")]
    SysCall { call: &'static str, code: u32 },

    #[error("no metric backend for this platform")]
    Unsupported,
}
