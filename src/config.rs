use crate::models::PrefixFilter;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Comma-separated interface-name prefixes excluded from the byte
    /// totals (e.g. "lo,docker,veth"). Empty means no exclusions.
    #[serde(default)]
    pub interface_prefixes_to_ignore: String,
    /// Gap between the two counter reads of one sampling cycle.
    pub sampling_interval_ms: u64,
    /// Gap between cycle starts of the periodic driver.
    #[serde(default = "default_cadence_ms")]
    pub cadence_ms: u64,
}

fn default_cadence_ms() -> u64 {
    1000
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            interface_prefixes_to_ignore: String::new(),
            sampling_interval_ms: 500,
            cadence_ms: default_cadence_ms(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl MonitoringConfig {
    pub fn sampling_interval(&self) -> Duration {
        Duration::from_millis(self.sampling_interval_ms)
    }

    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    pub fn prefix_filter(&self) -> PrefixFilter {
        PrefixFilter::from_comma_list(&self.interface_prefixes_to_ignore)
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.monitoring.sampling_interval_ms > 0,
            "monitoring.sampling_interval_ms must be > 0, got {}",
            self.monitoring.sampling_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.cadence_ms > 0,
            "monitoring.cadence_ms must be > 0, got {}",
            self.monitoring.cadence_ms
        );
        Ok(())
    }
}
