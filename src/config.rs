use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseSettings {
    /// Project URL; empty runs the service on in-memory storage
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub tables: TableSettings,
}

impl SupabaseSettings {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_submissions_table")]
    pub submissions: String,
    #[serde(default = "default_match_results_table")]
    pub match_results: String,
    #[serde(default = "default_calculations_table")]
    pub calculations: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            submissions: default_submissions_table(),
            match_results: default_match_results_table(),
            calculations: default_calculations_table(),
        }
    }
}

fn default_submissions_table() -> String { "tinker_hearts_submissions".to_string() }
fn default_match_results_table() -> String { "match_results".to_string() }
fn default_calculations_table() -> String { "love_calculations".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_local_calculations_path")]
    pub local_calculations_path: String,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            local_calculations_path: default_local_calculations_path(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_local_calculations_path() -> String { "data/love_calculations.json".to_string() }
fn default_history_limit() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HEARTS__)
    /// 5. SUPABASE_URL / SUPABASE_ANON_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HEARTS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HEARTS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_supabase_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HEARTS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_supabase_env(settings)?.try_deserialize()
    }
}

/// Let the conventional hosted-database variables override the file values
fn apply_supabase_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    apply_supabase_overrides(
        settings,
        env::var("SUPABASE_URL").ok(),
        env::var("SUPABASE_ANON_KEY").ok(),
    )
}

fn apply_supabase_overrides(
    settings: Config,
    url: Option<String>,
    api_key: Option<String>,
) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(key) = api_key {
        builder = builder.set_override("supabase.api_key", key)?;
    }

    builder.build()
}
