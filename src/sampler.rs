// Bandwidth rate sampling: two counter reads separated by a sleep.

use crate::error::ProbeError;
use crate::models::{BandwidthSnapshot, IfaceByteCounters, PrefixFilter};
use crate::platform;
use std::time::{Duration, Instant};

/// Floor for the measured elapsed time. Keeps the rate division away from
/// zero when the scheduler returns both reads within the same millisecond.
const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// One completed measurement window: the counters at both ends and the
/// wall-clock time that actually passed between them.
#[derive(Debug, Clone, Copy)]
pub struct SampleWindow {
    pub first: IfaceByteCounters,
    pub second: IfaceByteCounters,
    pub elapsed: Duration,
}

/// Reads the counters, sleeps for `interval`, reads again, and converts the
/// deltas into KB/s using the measured elapsed time rather than the nominal
/// interval (scheduler jitter would otherwise skew the rate).
pub async fn sample(
    filter: &PrefixFilter,
    interval: Duration,
) -> Result<BandwidthSnapshot, ProbeError> {
    let started = Instant::now();
    let first = platform::read_counters(filter)?;
    tokio::time::sleep(interval).await;
    let second = platform::read_counters(filter)?;
    Ok(compute_rates(&SampleWindow {
        first,
        second,
        elapsed: started.elapsed(),
    }))
}

/// Rate = (delta bytes / 1024) / elapsed seconds, per direction.
///
/// Deltas are signed: a counter reset or interface renumbering between the
/// two reads yields a negative rate, passed through rather than clamped.
pub fn compute_rates(window: &SampleWindow) -> BandwidthSnapshot {
    let secs = window.elapsed.max(MIN_ELAPSED).as_secs_f64();
    BandwidthSnapshot {
        upload_kbps: signed_delta(window.first.bytes_sent, window.second.bytes_sent)
            / 1024.0
            / secs,
        download_kbps: signed_delta(window.first.bytes_received, window.second.bytes_received)
            / 1024.0
            / secs,
    }
}

fn signed_delta(before: u64, after: u64) -> f64 {
    (after as i128 - before as i128) as f64
}
