// Local file feed repository implementation
use crate::application::feed_repository::{PollFeedRepository, PollRecord, PrecomputedPayload};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileFeedRepository {
    records_path: PathBuf,
    payload_path: PathBuf,
}

impl FileFeedRepository {
    pub fn new(directory: impl Into<PathBuf>, records_name: &str, payload_name: &str) -> Self {
        let directory = directory.into();
        Self {
            records_path: directory.join(records_name),
            payload_path: directory.join(payload_name),
        }
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        tracing::debug!("Reading feed {}", path.display());
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[async_trait]
impl PollFeedRepository for FileFeedRepository {
    async fn fetch_records(&self) -> Result<Vec<PollRecord>> {
        Self::read_json(&self.records_path).await
    }

    async fn fetch_payload(&self) -> Result<PrecomputedPayload> {
        Self::read_json(&self.payload_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("poll-trends-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_reads_both_feeds() {
        let dir = scratch_dir("feeds");
        std::fs::write(
            dir.join("records.json"),
            r#"[{"data": "11 Feb 2026", "instituto": "Datafolha", "candidatos": {"Lula": 30}}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("payload.json"),
            r#"{"datas": ["2026-02-11T00:00:00"], "candidatos": {}}"#,
        )
        .unwrap();

        let repo = FileFeedRepository::new(&dir, "records.json", "payload.json");
        let records = repo.fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].candidatos["Lula"], Some(30.0));
        assert_eq!(repo.fetch_payload().await.unwrap().datas.len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_or_malformed_feed_errors() {
        let dir = scratch_dir("broken");
        std::fs::write(dir.join("records.json"), "[{").unwrap();

        let repo = FileFeedRepository::new(&dir, "records.json", "absent.json");
        let err = repo.fetch_records().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
        let err = repo.fetch_payload().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
