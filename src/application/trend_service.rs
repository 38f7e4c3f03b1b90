// Trend service - Use case for building and re-windowing poll trend charts
use crate::application::feed_repository::{CandidateTrack, PollFeedRepository, PollRecord, PrecomputedPayload};
use crate::domain::chart::{ChartFrame, ChartPoint, EntityView, MOVING_AVERAGE_LABEL};
use crate::domain::date_resolver::format_day_label;
use crate::domain::poll::{Entity, Observation, Timestamp, extract_series, timestamps};
use crate::domain::range::{
    DateSpan, RangeHandle, RangeHandles, VisibleRange, filter_indices, line_position, raw_point_position,
};
use crate::domain::ranking::{RankedEntry, rank_latest};
use crate::domain::smoothing::MovingAverageEngine;
use crate::domain::summary::{PollSummary, summarize};
use crate::error::{Result, TrendError};
use crate::infrastructure::config::{SmoothingConfig, SmoothingSource};
use chrono::DateTime;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct TrackedEntity {
    entity: Entity,
    raw: Vec<Option<f64>>,
    smoothed: Vec<Option<f64>>,
}

/// Loaded poll data, cached full-range smoothing and the user's window.
///
/// Everything but the range handles and the hidden set is fixed at build time.
#[derive(Debug, Clone)]
pub struct TrendSession {
    observations: Vec<Observation>,
    dates: Vec<Option<Timestamp>>,
    span: DateSpan,
    tracked: Vec<TrackedEntity>,
    handles: RangeHandles,
    hidden: HashSet<String>,
}

/// Reverse the newest-first feed into chronological observations
pub fn observations_from_records(records: Vec<PollRecord>) -> Vec<Observation> {
    records
        .into_iter()
        .rev()
        .map(|r| Observation::new(r.data, r.instituto.unwrap_or_default(), r.candidatos))
        .collect()
}

impl TrendSession {
    pub fn build(
        records: Vec<PollRecord>,
        payload: &PrecomputedPayload,
        roster: &[Entity],
        smoothing: &SmoothingConfig,
    ) -> Result<Self> {
        let observations = observations_from_records(records);
        if payload.datas.len() != observations.len() {
            return Err(TrendError::PayloadMisaligned {
                records: observations.len(),
                payload: payload.datas.len(),
            });
        }

        let dates = timestamps(&observations);
        let span = DateSpan::from_dates(&dates).ok_or(TrendError::NoValidDates)?;
        let engine = MovingAverageEngine::new(smoothing.window_days)?;

        let mut tracked = Vec::new();
        for series in extract_series(&observations, roster) {
            let Some(track) = payload.candidatos.get(&series.entity.feed_key) else {
                tracing::warn!(
                    "Payload has no entry for {} ({}), skipping",
                    series.entity.name,
                    series.entity.feed_key
                );
                continue;
            };

            let smoothed = match smoothing.source {
                SmoothingSource::Computed => engine.smooth(&series.values, &dates),
                SmoothingSource::Precomputed => {
                    if track.media_movel.len() != observations.len() {
                        tracing::warn!(
                            "Precomputed average for {} has {} entries, expected {}, skipping",
                            series.entity.name,
                            track.media_movel.len(),
                            observations.len()
                        );
                        continue;
                    }
                    track.media_movel.clone()
                }
            };

            tracing::debug!(
                "{}: {} polls smoothed over ±{} days",
                series.entity.name,
                series.observation_count(),
                engine.window_days()
            );

            tracked.push(TrackedEntity {
                entity: series.entity,
                raw: series.values,
                smoothed,
            });
        }

        let undated = dates.iter().filter(|d| d.is_none()).count();
        tracing::info!(
            "Loaded {} polls ({} undated), tracking {} of {} entities",
            observations.len(),
            undated,
            tracked.len(),
            roster.len()
        );

        Ok(Self {
            observations,
            dates,
            span,
            tracked,
            handles: RangeHandles::full(),
            hidden: HashSet::new(),
        })
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.handles.range(self.span)
    }

    pub fn smoothed(&self, name: &str) -> Option<&[Option<f64>]> {
        self.tracked
            .iter()
            .find(|t| t.entity.name == name)
            .map(|t| t.smoothed.as_slice())
    }

    pub fn drag(&mut self, handle: RangeHandle, percent: f64) -> ChartFrame {
        self.handles.drag(handle, percent);
        self.frame()
    }

    /// Show or hide an entity's line and points together
    pub fn toggle_entity(&mut self, name: &str) -> Result<ChartFrame> {
        if !self.tracked.iter().any(|t| t.entity.name == name) {
            return Err(TrendError::UnknownEntity(name.to_string()));
        }
        if !self.hidden.remove(name) {
            self.hidden.insert(name.to_string());
        }
        Ok(self.frame())
    }

    pub fn frame(&self) -> ChartFrame {
        let range = self.visible_range();
        let visible = filter_indices(&self.dates, range);

        let views = self
            .tracked
            .iter()
            .map(|tracked| self.entity_view(tracked, &visible))
            .collect();

        ChartFrame {
            label: format!("{} a {}", format_day_label(range.start), format_day_label(range.end)),
            start_percent: self.handles.start(),
            end_percent: self.handles.end(),
            visible_count: visible.len(),
            views,
            ranking: self.ranking(),
        }
    }

    /// Snapshot of the latest trend, independent of the visible window
    pub fn ranking(&self) -> Vec<RankedEntry> {
        rank_latest(self.tracked.iter().map(|t| (&t.entity, t.smoothed.as_slice())))
    }

    /// Raw-poll statistics per tracked entity; entities with no poll are left out
    pub fn summary(&self) -> Vec<PollSummary> {
        self.tracked
            .iter()
            .filter_map(|t| summarize(&t.entity, &t.raw))
            .collect()
    }

    /// The session's smoothing in the precomputed payload format
    pub fn export_payload(&self) -> PrecomputedPayload {
        let datas = self
            .dates
            .iter()
            .map(|date| {
                date.and_then(DateTime::from_timestamp_millis)
                    .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string())
                    .unwrap_or_default()
            })
            .collect();

        let candidatos = self
            .tracked
            .iter()
            .map(|t| {
                (
                    t.entity.feed_key.clone(),
                    CandidateTrack {
                        media_movel: t.smoothed.clone(),
                        pesquisas_brutos: t.raw.clone(),
                    },
                )
            })
            .collect();

        PrecomputedPayload {
            datas,
            institutos: self.observations.iter().map(|o| o.source.clone()).collect(),
            candidatos,
        }
    }

    fn entity_view(&self, tracked: &TrackedEntity, visible: &[usize]) -> EntityView {
        let line = visible
            .iter()
            .enumerate()
            .filter_map(|(local, &idx)| {
                let y = tracked.smoothed[idx]?;
                Some(ChartPoint::new(
                    line_position(local, visible.len()),
                    y,
                    MOVING_AVERAGE_LABEL.to_string(),
                    self.observations[idx].date_text.clone(),
                ))
            })
            .collect();

        let points = visible
            .iter()
            .filter_map(|&idx| {
                let y = tracked.raw[idx]?;
                let ts = self.dates[idx]?;
                let obs = &self.observations[idx];
                Some(ChartPoint::new(
                    raw_point_position(ts, self.span),
                    y,
                    obs.source.clone(),
                    obs.date_text.clone(),
                ))
            })
            .collect();

        EntityView {
            name: tracked.entity.name.clone(),
            color: tracked.entity.color.clone(),
            hidden: self.hidden.contains(&tracked.entity.name),
            line,
            points,
        }
    }
}

/// Shared handle over one session; every interaction runs under the lock
#[derive(Clone)]
pub struct TrendService {
    session: Arc<Mutex<TrendSession>>,
}

impl TrendService {
    pub fn new(session: TrendSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Fetch records, then the payload, then build the session.
    /// Any failure leaves nothing constructed.
    pub async fn load(
        repository: Arc<dyn PollFeedRepository>,
        roster: &[Entity],
        smoothing: &SmoothingConfig,
    ) -> Result<Self> {
        let records = repository
            .fetch_records()
            .await
            .map_err(|e| TrendError::Ingestion(format!("records feed: {e:#}")))?;
        let payload = repository
            .fetch_payload()
            .await
            .map_err(|e| TrendError::Ingestion(format!("payload feed: {e:#}")))?;

        let session = TrendSession::build(records, &payload, roster, smoothing)?;
        Ok(Self::new(session))
    }

    pub async fn frame(&self) -> ChartFrame {
        self.session.lock().await.frame()
    }

    pub async fn drag(&self, handle: RangeHandle, percent: f64) -> ChartFrame {
        self.session.lock().await.drag(handle, percent)
    }

    pub async fn toggle_entity(&self, name: &str) -> Result<ChartFrame> {
        self.session.lock().await.toggle_entity(name)
    }

    pub async fn ranking(&self) -> Vec<RankedEntry> {
        self.session.lock().await.ranking()
    }

    pub async fn summary(&self) -> Vec<PollSummary> {
        self.session.lock().await.summary()
    }

    pub async fn export_payload(&self) -> PrecomputedPayload {
        self.session.lock().await.export_payload()
    }
}
