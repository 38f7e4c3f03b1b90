// Preference service - Persisted visual preferences
use async_trait::async_trait;
use std::sync::Arc;

pub const DARK_MODE_KEY: &str = "darkMode";

/// Local key-value storage that survives restarts
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub async fn dark_mode(&self) -> anyhow::Result<bool> {
        Ok(self.store.get(DARK_MODE_KEY).await?.as_deref() == Some("true"))
    }

    /// Flip the preference and return the new value
    pub async fn toggle_dark_mode(&self) -> anyhow::Result<bool> {
        let enabled = !self.dark_mode().await?;
        self.store.set(DARK_MODE_KEY, &enabled.to_string()).await?;
        Ok(enabled)
    }
}
