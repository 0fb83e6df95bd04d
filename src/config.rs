use serde::Deserialize;

use crate::capacity::DEFAULT_CAPACITY_FIELD;
use crate::metrics::MetricsTimeSpan;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Record field sorted on when a capacity sort request names none.
    #[serde(default = "default_capacity_field")]
    pub capacity_field: String,
    /// Graph window used when a metrics request names none.
    #[serde(default)]
    pub default_time_span: MetricsTimeSpan,
    /// Largest grid POST /api/series/densify will build; bigger windows are rejected.
    #[serde(default = "default_max_densify_ticks")]
    pub max_densify_ticks: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            capacity_field: default_capacity_field(),
            default_time_span: MetricsTimeSpan::default(),
            max_densify_ticks: default_max_densify_ticks(),
        }
    }
}

fn default_capacity_field() -> String {
    DEFAULT_CAPACITY_FIELD.to_string()
}

fn default_max_densify_ticks() -> u64 {
    100_000
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
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            !self.dashboard.capacity_field.trim().is_empty(),
            "dashboard.capacity_field must be non-empty"
        );
        anyhow::ensure!(
            self.dashboard.max_densify_ticks > 0,
            "dashboard.max_densify_ticks must be > 0, got {}",
            self.dashboard.max_densify_ticks
        );
        Ok(())
    }
}
