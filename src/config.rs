use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub liveness: LivenessConfig,
    pub client: ClientConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LivenessConfig {
    /// LED toggle cadence while at least one connection is active.
    pub toggle_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub send_interval_secs: u64,
    /// Total samples pushed before the client closes its connection.
    pub iterations: u32,
    #[serde(default = "default_connect_error_delay_secs")]
    pub connect_error_delay_secs: u64,
}

fn default_connect_error_delay_secs() -> u64 {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    /// Upper bound on one newline-framed message; longer lines are discarded.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

fn default_max_frame_bytes() -> usize {
    1024
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: default_max_frame_bytes(),
        }
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
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.liveness.toggle_interval_secs > 0,
            "liveness.toggle_interval_secs must be > 0, got {}",
            self.liveness.toggle_interval_secs
        );
        anyhow::ensure!(
            self.client.port > 0,
            "client.port must be between 1 and 65535, got {}",
            self.client.port
        );
        anyhow::ensure!(!self.client.host.is_empty(), "client.host must be non-empty");
        anyhow::ensure!(
            self.client.send_interval_secs > 0,
            "client.send_interval_secs must be > 0, got {}",
            self.client.send_interval_secs
        );
        anyhow::ensure!(
            self.client.iterations > 0,
            "client.iterations must be > 0, got {}",
            self.client.iterations
        );
        anyhow::ensure!(
            self.transport.max_frame_bytes > 0,
            "transport.max_frame_bytes must be > 0, got {}",
            self.transport.max_frame_bytes
        );
        Ok(())
    }
}
