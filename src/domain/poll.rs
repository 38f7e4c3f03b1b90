// Poll observation and per-entity series domain models
use super::date_resolver::resolve_date;
use serde::Deserialize;
use std::collections::HashMap;

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A polled candidate: display name, key used by the feeds, chart color
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Entity {
    pub name: String,
    pub feed_key: String,
    pub color: String,
}

impl Entity {
    pub fn new(name: &str, feed_key: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            feed_key: feed_key.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Observation {
    pub timestamp: Option<Timestamp>,
    pub date_text: String,
    pub source: String,
    pub values: HashMap<String, Option<f64>>,
}

impl Observation {
    /// A missing date leaves the observation undated with empty date text
    pub fn new(date_text: Option<String>, source: String, values: HashMap<String, Option<f64>>) -> Self {
        let timestamp = date_text.as_deref().and_then(resolve_date);
        if timestamp.is_none() {
            tracing::debug!("Unrecognised poll date {:?} from {}", date_text, source);
        }
        Self {
            timestamp,
            date_text: date_text.unwrap_or_default(),
            source,
            values,
        }
    }

    pub fn value_for(&self, feed_key: &str) -> Option<f64> {
        self.values.get(feed_key).copied().flatten()
    }
}

/// One entity's raw values, index-aligned with the observation sequence
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub entity: Entity,
    pub values: Vec<Option<f64>>,
}

impl EntitySeries {
    pub fn observation_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Project every roster entity across all observations.
///
/// Observations with unresolved dates stay in place so indices keep matching
/// the record count.
pub fn extract_series(observations: &[Observation], roster: &[Entity]) -> Vec<EntitySeries> {
    roster
        .iter()
        .map(|entity| EntitySeries {
            entity: entity.clone(),
            values: observations
                .iter()
                .map(|obs| obs.value_for(&entity.feed_key))
                .collect(),
        })
        .collect()
}

pub fn timestamps(observations: &[Observation]) -> Vec<Option<Timestamp>> {
    observations.iter().map(|obs| obs.timestamp).collect()
}
