// Repository trait for poll feed access
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One published poll, as delivered by the records feed.
///
/// Date and institute may be null or absent; such records keep their slot.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PollRecord {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub instituto: Option<String>,
    #[serde(default)]
    pub candidatos: HashMap<String, Option<f64>>,
}

/// Per-candidate arrays of the precomputed payload
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CandidateTrack {
    pub media_movel: Vec<Option<f64>>,
    pub pesquisas_brutos: Vec<Option<f64>>,
}

/// Precomputed smoothing payload, positionally aligned with the records
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PrecomputedPayload {
    pub datas: Vec<String>,
    #[serde(default)]
    pub institutos: Vec<String>,
    #[serde(default)]
    pub candidatos: BTreeMap<String, CandidateTrack>,
}

#[async_trait]
pub trait PollFeedRepository: Send + Sync {
    /// Fetch the poll records, newest first
    async fn fetch_records(&self) -> anyhow::Result<Vec<PollRecord>>;

    /// Fetch the precomputed moving-average payload
    async fn fetch_payload(&self) -> anyhow::Result<PrecomputedPayload>;
}
