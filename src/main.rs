use anyhow::Result;
use hostmetrics::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = match config::AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "config not loaded; using defaults");
            config::AppConfig::default()
        }
    };

    let topology = count_cores();
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        physical_cores = topology.physical_cores,
        logical_cores = topology.logical_cores,
        kernel = %kernel_version(),
        total_memory_gib = total_memory_gib(),
        available_memory_gib = available_memory_gib(),
        "host probed"
    );

    let settings = monitor::Settings::new(app_config.monitoring.clone());
    let handle = monitor::spawn(settings);
    let report_interval = app_config.monitoring.cadence().max(std::time::Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
                break;
            }
            _ = tokio::time::sleep(report_interval) => {
                let (upload, download) = handle.network_speeds_kbps();
                tracing::info!(upload_kbps = upload, download_kbps = download, "bandwidth");
            }
        }
    }

    handle.stop();
    Ok(())
}
