use crate::domain::poll::Entity;
use crate::domain::smoothing::DEFAULT_WINDOW_DAYS;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    /// Config file declaring the charted entities
    #[serde(default = "default_roster")]
    pub roster: String,
    pub feeds: FeedSettings,
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    #[serde(default)]
    pub preferences: PreferenceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Http,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    pub source: FeedSource,
    /// Base URL for `http`, directory for `file`
    pub location: String,
    #[serde(default = "default_records_name")]
    pub records: String,
    #[serde(default = "default_payload_name")]
    pub payload: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingSource {
    /// Run the moving-average engine over the records feed
    #[default]
    Computed,
    /// Trust `media_movel` from the precomputed payload
    Precomputed,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    #[serde(default)]
    pub source: SmoothingSource,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            source: SmoothingSource::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferenceSettings {
    #[serde(default = "default_preferences_path")]
    pub path: String,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RosterConfig {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

fn default_roster() -> String {
    "config/entities".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_records_name() -> String {
    "pesquisas_2026_normalizado.json".to_string()
}

fn default_payload_name() -> String {
    "media_movel_precalculada.json".to_string()
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

fn default_preferences_path() -> String {
    "data/preferences.json".to_string()
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/poll_trends"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_roster(name: &str) -> anyhow::Result<Vec<Entity>> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name))
        .build()?;

    let roster: RosterConfig = settings.try_deserialize()?;
    if roster.entities.is_empty() {
        anyhow::bail!("{} declares no entities", name);
    }
    Ok(roster.entities)
}
