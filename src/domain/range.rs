// Visible time window and relative chart positions
use super::poll::Timestamp;
use serde::Deserialize;

/// Earliest and latest resolvable timestamps of the whole load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub min: Timestamp,
    pub max: Timestamp,
}

impl DateSpan {
    pub fn from_dates(dates: &[Option<Timestamp>]) -> Option<Self> {
        let mut valid = dates.iter().flatten().copied();
        let first = valid.next()?;
        let (min, max) = valid.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
        Some(Self { min, max })
    }

    pub fn duration(&self) -> i64 {
        self.max - self.min
    }

    /// Timestamp at `percent` (0-100) of the span
    pub fn at_percent(&self, percent: f64) -> Timestamp {
        let percent = percent.clamp(0.0, 100.0);
        self.min + (self.duration() as f64 * percent / 100.0).round() as i64
    }
}

/// User-selected interval, always ordered and inside the load's span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl VisibleRange {
    pub fn full(span: DateSpan) -> Self {
        Self {
            start: span.min,
            end: span.max,
        }
    }

    pub fn new(span: DateSpan, start: Timestamp, end: Timestamp) -> Self {
        let start = start.clamp(span.min, span.max);
        let end = end.clamp(span.min, span.max);
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeHandle {
    Start,
    End,
}

/// The two slider handles, as percentages of the full span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeHandles {
    start: f64,
    end: f64,
}

impl RangeHandles {
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Move one handle. A handle dragged past the other is pinned to it.
    pub fn drag(&mut self, handle: RangeHandle, percent: f64) {
        if !percent.is_finite() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0);
        match handle {
            RangeHandle::Start => self.start = percent.min(self.end),
            RangeHandle::End => self.end = percent.max(self.start),
        }
    }

    pub fn range(&self, span: DateSpan) -> VisibleRange {
        VisibleRange::new(span, span.at_percent(self.start), span.at_percent(self.end))
    }
}

/// Indices whose timestamp falls inside `range`, in original order.
/// Undated indices are left out without shifting the others.
pub fn filter_indices(dates: &[Option<Timestamp>], range: VisibleRange) -> Vec<usize> {
    dates
        .iter()
        .enumerate()
        .filter_map(|(idx, date)| date.filter(|&ts| range.contains(ts)).map(|_| idx))
        .collect()
}

/// Smoothed-line x position: evenly spaced by count across the visible subset
pub fn line_position(local_index: usize, visible_count: usize) -> f64 {
    local_index as f64 / visible_count.saturating_sub(1).max(1) as f64
}

/// Raw-point x position: proportional to elapsed time over the full span
pub fn raw_point_position(ts: Timestamp, span: DateSpan) -> f64 {
    let duration = span.duration();
    if duration <= 0 {
        return 0.0;
    }
    (ts - span.min) as f64 / duration as f64
}
