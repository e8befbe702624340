// Monitor lifecycle tests: spawn, publish, early stop

use hostmetrics::config::MonitoringConfig;
use hostmetrics::monitor::{Settings, spawn};

fn config(sampling_interval_ms: u64, cadence_ms: u64) -> MonitoringConfig {
    MonitoringConfig {
        interface_prefixes_to_ignore: String::new(),
        sampling_interval_ms,
        cadence_ms,
    }
}

#[tokio::test]
async fn test_monitor_runs_cycles_and_stops() {
    let handle = spawn(Settings::new(config(10, 25)));
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let (upload, download) = handle.network_speeds_kbps();
    assert!(upload.is_finite());
    assert!(download.is_finite());

    handle.stop();
}

#[tokio::test]
async fn test_stop_before_first_cycle_leaves_zero_default() {
    // The first cycle sleeps for its full sampling interval before it can
    // publish, so stopping well inside that window must leave the store at
    // its zero-initialized default.
    let handle = spawn(Settings::new(config(500, 1000)));
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    assert_eq!(handle.network_speeds_kbps(), (0.0, 0.0));
    handle.stop();
}

#[tokio::test]
async fn test_settings_update_applies_between_cycles() {
    let handle = spawn(Settings::new(config(10, 25)));
    handle.settings().update(config(5, 25));
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    let (upload, download) = handle.network_speeds_kbps();
    assert!(upload.is_finite());
    assert!(download.is_finite());
    handle.stop();
}

#[tokio::test]
async fn test_dropping_handle_cancels_future_cycles() {
    let handle = spawn(Settings::new(config(10, 25)));
    drop(handle);
    // Nothing to assert beyond not hanging; the shutdown signal fires on
    // drop and the driver task exits.
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
}
