use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ceph: CephConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Management API endpoint and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct CephConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Management endpoints commonly run with self-signed certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_summary_interval_ms")]
    pub summary_interval_ms: u64,
    #[serde(default = "default_multi_cluster_interval_ms")]
    pub multi_cluster_interval_ms: u64,
    /// Token expiry changes slowly; polled less often than the cluster list.
    #[serde(default = "default_token_status_interval_ms")]
    pub token_status_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            summary_interval_ms: default_summary_interval_ms(),
            multi_cluster_interval_ms: default_multi_cluster_interval_ms(),
            token_status_interval_ms: default_token_status_interval_ms(),
        }
    }
}

fn default_summary_interval_ms() -> u64 {
    5_000
}

fn default_multi_cluster_interval_ms() -> u64 {
    5_000
}

fn default_token_status_interval_ms() -> u64 {
    60_000
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config file {}: {}", path, e))?;
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
            self.ceph.url.starts_with("http://") || self.ceph.url.starts_with("https://"),
            "ceph.url must start with http:// or https://, got {:?}",
            self.ceph.url
        );
        anyhow::ensure!(
            !self.ceph.username.is_empty(),
            "ceph.username must be non-empty"
        );
        anyhow::ensure!(
            self.ceph.request_timeout_secs > 0,
            "ceph.request_timeout_secs must be > 0, got {}",
            self.ceph.request_timeout_secs
        );
        anyhow::ensure!(
            self.polling.summary_interval_ms > 0,
            "polling.summary_interval_ms must be > 0, got {}",
            self.polling.summary_interval_ms
        );
        anyhow::ensure!(
            self.polling.multi_cluster_interval_ms > 0,
            "polling.multi_cluster_interval_ms must be > 0, got {}",
            self.polling.multi_cluster_interval_ms
        );
        anyhow::ensure!(
            self.polling.token_status_interval_ms > 0,
            "polling.token_status_interval_ms must be > 0, got {}",
            self.polling.token_status_interval_ms
        );
        Ok(())
    }
}
