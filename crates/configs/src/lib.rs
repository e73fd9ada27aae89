use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Which document store backend the services talk to.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Ordered maps persisted to JSON files on every write.
    #[default]
    File,
    /// Ordered maps kept in process memory only.
    Memory,
    /// `document` table reached through sea-orm.
    Database,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Directory holding one `<collection>.json` per collection (file backend).
    #[serde(default = "default_store_dir")]
    pub dir: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            dir: default_store_dir(),
            url: String::new(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Per-service read-through cache settings.
///
/// Leaving `max_capacity` unset keeps every decoded entity for the lifetime
/// of the service.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default)]
    pub max_capacity: Option<u64>,
    #[serde(default)]
    pub time_to_live_secs: Option<u64>,
}

fn default_store_dir() -> String { "data".to_string() }
fn default_max_connections() -> u32 { 10 }
fn default_connect_timeout() -> u64 { 30 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.store.normalize_from_env();
        self.store.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        if self.dir.trim().is_empty() {
            self.dir = default_store_dir();
        }
        // database url may come from the environment instead of the file
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend != StoreBackend::Database {
            return Ok(());
        }
        if self.url.trim().is_empty() {
            return Err(anyhow!("store.url is empty; set it in config.toml or via DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("store.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.max_connections == 0 {
            return Err(anyhow!("store.max_connections must be >= 1"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(anyhow!("store.connect_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl CacheConfig {
    /// Unbounded cache, entries kept until the owning service is dropped.
    pub fn unbounded() -> Self { Self::default() }

    pub fn validate(&self) -> Result<()> {
        if self.max_capacity == Some(0) {
            return Err(anyhow!("cache.max_capacity must be >= 1 when set; omit it for an unbounded cache"));
        }
        if self.time_to_live_secs == Some(0) {
            return Err(anyhow!("cache.time_to_live_secs must be >= 1 when set"));
        }
        Ok(())
    }
}
