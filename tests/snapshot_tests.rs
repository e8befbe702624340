// SpeedStore consistency: readers never observe a mixed-cycle pair

use hostmetrics::models::BandwidthSnapshot;
use hostmetrics::snapshot::SpeedStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn test_store_starts_at_zero_default() {
    let store = SpeedStore::new();
    assert_eq!(store.read(), BandwidthSnapshot::default());
}

#[test]
fn test_publish_replaces_whole_pair() {
    let store = SpeedStore::new();
    store.publish(BandwidthSnapshot {
        upload_kbps: 1.0,
        download_kbps: 2.0,
    });
    store.publish(BandwidthSnapshot {
        upload_kbps: 3.0,
        download_kbps: 4.0,
    });
    let snapshot = store.read();
    assert_eq!(snapshot.upload_kbps, 3.0);
    assert_eq!(snapshot.download_kbps, 4.0);
}

#[test]
fn test_concurrent_readers_never_see_mixed_pairs() {
    // Every published pair satisfies download == upload + 1. If a reader
    // ever saw fields from two different publishes, the relation would
    // break for that read.
    let store = Arc::new(SpeedStore::new());
    store.publish(BandwidthSnapshot {
        upload_kbps: 0.0,
        download_kbps: 1.0,
    });
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let stop = stop.clone();
            std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let snapshot = store.read();
                    assert_eq!(
                        snapshot.download_kbps,
                        snapshot.upload_kbps + 1.0,
                        "observed a pair from two different publishes"
                    );
                }
            })
        })
        .collect();

    for i in 0..10_000u32 {
        let upload = f64::from(i);
        store.publish(BandwidthSnapshot {
            upload_kbps: upload,
            download_kbps: upload + 1.0,
        });
    }
    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().expect("reader panicked");
    }
}
