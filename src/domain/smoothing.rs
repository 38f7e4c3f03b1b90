//! Moving Average Engine
//!
//! Centered, time-windowed moving average for sparse poll series, followed by
//! a linear gap fill over index distance.

use super::poll::{MS_PER_DAY, Timestamp};
use crate::error::{Result, TrendError};

pub const DEFAULT_WINDOW_DAYS: i64 = 31;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverageEngine {
    window_days: i64,
}

impl MovingAverageEngine {
    /// Create an engine averaging over ±`window_days` around each reference date
    pub fn new(window_days: i64) -> Result<Self> {
        if window_days <= 0 {
            return Err(TrendError::InvalidWindow(window_days));
        }
        Ok(Self { window_days })
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Windowed average followed by gap fill.
    ///
    /// The result is `None` everywhere only when `values` holds no usable
    /// observation at all.
    pub fn smooth(&self, values: &[Option<f64>], dates: &[Option<Timestamp>]) -> Vec<Option<f64>> {
        fill_gaps(&self.windowed_average(values, dates))
    }

    /// Mean of every same-entity observation within the window of each dated
    /// observation. Undated or missing positions stay `None`.
    ///
    /// Sliding two-pointer scan over the observations ordered by timestamp;
    /// both window edges only ever move forward.
    pub fn windowed_average(
        &self,
        values: &[Option<f64>],
        dates: &[Option<Timestamp>],
    ) -> Vec<Option<f64>> {
        let window_ms = self.window_days.saturating_mul(MS_PER_DAY);
        let mut out = vec![None; values.len()];

        let mut points: Vec<(Timestamp, f64, usize)> = values
            .iter()
            .zip(dates)
            .enumerate()
            .filter_map(|(idx, (value, date))| Some(((*date)?, (*value)?, idx)))
            .collect();
        points.sort_by_key(|&(ts, _, _)| ts);

        let mut lo = 0;
        let mut hi = 0;
        let mut sum = 0.0;
        for &(ts, _, idx) in &points {
            while hi < points.len() && points[hi].0 <= ts.saturating_add(window_ms) {
                sum += points[hi].1;
                hi += 1;
            }
            while points[lo].0 < ts.saturating_sub(window_ms) {
                sum -= points[lo].1;
                lo += 1;
            }
            // lo <= own position < hi, so the window is never empty
            out[idx] = Some(sum / (hi - lo) as f64);
        }

        out
    }
}

impl Default for MovingAverageEngine {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Fill `None` positions by linear interpolation over index distance between
/// the nearest known neighbours; edges flat-extend the nearest known value.
pub fn fill_gaps(stage: &[Option<f64>]) -> Vec<Option<f64>> {
    let known: Vec<(usize, f64)> = stage
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.map(|v| (idx, v)))
        .collect();

    let (Some(&(first_idx, first)), Some(&(last_idx, last))) = (known.first(), known.last()) else {
        return stage.to_vec();
    };

    let mut out = stage.to_vec();
    for slot in &mut out[..first_idx] {
        *slot = Some(first);
    }
    for slot in &mut out[last_idx + 1..] {
        *slot = Some(last);
    }
    for pair in known.windows(2) {
        let (prev_idx, prev) = pair[0];
        let (next_idx, next) = pair[1];
        let span = (next_idx - prev_idx) as f64;
        for idx in prev_idx + 1..next_idx {
            let ratio = (idx - prev_idx) as f64 / span;
            out[idx] = Some(prev + (next - prev) * ratio);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(offsets: &[i64]) -> Vec<Option<Timestamp>> {
        offsets.iter().map(|d| Some(1_759_276_800_000 + d * MS_PER_DAY)).collect()
    }

    fn assert_close(actual: &[Option<f64>], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            let a = a.expect("value present");
            assert!((a - e).abs() < 1e-6, "expected {e}, got {a}");
        }
    }

    /// Direct all-pairs definition for cross-checking the sliding scan
    fn all_pairs(values: &[Option<f64>], dates: &[Option<Timestamp>], window_days: i64) -> Vec<Option<f64>> {
        let window_ms = window_days * MS_PER_DAY;
        (0..values.len())
            .map(|i| {
                let (base, _) = (dates[i]?, values[i]?);
                let in_window: Vec<f64> = (0..values.len())
                    .filter_map(|j| {
                        let (d, v) = (dates[j]?, values[j]?);
                        ((d - base).abs() <= window_ms).then_some(v)
                    })
                    .collect();
                Some(in_window.iter().sum::<f64>() / in_window.len() as f64)
            })
            .collect()
    }

    #[test]
    fn test_rejects_non_positive_window() {
        assert_eq!(MovingAverageEngine::new(0), Err(TrendError::InvalidWindow(0)));
        assert_eq!(MovingAverageEngine::new(-3), Err(TrendError::InvalidWindow(-3)));
        assert_eq!(MovingAverageEngine::default().window_days(), 31);
    }

    #[test]
    fn test_window_excludes_distant_observation() {
        let engine = MovingAverageEngine::default();
        let values = vec![Some(10.0), Some(20.0), Some(30.0)];
        let stage = engine.windowed_average(&values, &days(&[0, 10, 50]));
        assert_close(&stage, &[15.0, 15.0, 30.0]);
    }

    #[test]
    fn test_window_bound_is_inclusive() {
        let engine = MovingAverageEngine::default();
        let values = vec![Some(10.0), Some(20.0), Some(30.0)];
        // day 10 and day 40 are exactly 30 days apart, inside ±31
        let stage = engine.windowed_average(&values, &days(&[0, 10, 40]));
        assert_close(&stage, &[15.0, 20.0, 25.0]);

        let edge = engine.windowed_average(&[Some(1.0), Some(3.0)], &days(&[0, 31]));
        assert_close(&edge, &[2.0, 2.0]);
    }

    #[test]
    fn test_isolated_observations_keep_raw_values() {
        let engine = MovingAverageEngine::default();
        let values = vec![Some(0.1), Some(0.2), Some(41.7), Some(3.3)];
        let stage = engine.windowed_average(&values, &days(&[0, 32, 64, 200]));
        assert_close(&stage, &[0.1, 0.2, 41.7, 3.3]);
    }

    #[test]
    fn test_gap_fill_interpolates_by_index() {
        let engine = MovingAverageEngine::default();
        let values = vec![Some(5.0), None, None, Some(15.0)];
        let dates = days(&[0, 40, 80, 120]);

        let stage = engine.windowed_average(&values, &dates);
        assert_eq!(stage[1], None);
        assert_eq!(stage[2], None);
        assert_close(&[stage[0], stage[3]], &[5.0, 15.0]);

        let smoothed = engine.smooth(&values, &dates);
        assert_close(&smoothed, &[5.0, 8.333333, 11.666667, 15.0]);
    }

    #[test]
    fn test_single_observation_is_flat() {
        let engine = MovingAverageEngine::default();
        let values = vec![None, None, Some(7.5), None, None];
        let smoothed = engine.smooth(&values, &days(&[0, 5, 10, 15, 20]));
        assert_eq!(smoothed, vec![Some(7.5); 5]);
    }

    #[test]
    fn test_entity_without_observations_stays_empty() {
        let engine = MovingAverageEngine::default();
        let smoothed = engine.smooth(&[None, None, None], &days(&[0, 1, 2]));
        assert_eq!(smoothed, vec![None, None, None]);
        assert!(engine.smooth(&[], &[]).is_empty());
    }

    #[test]
    fn test_undated_observation_is_skipped_then_filled() {
        let engine = MovingAverageEngine::default();
        let values = vec![Some(10.0), Some(99.0), Some(20.0)];
        let dates = vec![days(&[0])[0], None, days(&[100])[0]];

        let stage = engine.windowed_average(&values, &dates);
        assert_eq!(stage[1], None);

        let smoothed = engine.smooth(&values, &dates);
        assert_close(&smoothed, &[10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_no_nulls_once_entity_has_data() {
        let engine = MovingAverageEngine::new(14).unwrap();
        let values = vec![None, Some(30.0), None, None, Some(33.0), None, Some(29.0), None];
        let dates = days(&[0, 3, 9, 20, 21, 40, 41, 90]);
        let smoothed = engine.smooth(&values, &dates);
        assert!(smoothed.iter().all(Option::is_some));
    }

    #[test]
    fn test_sliding_scan_matches_all_pairs() {
        let values = vec![
            Some(31.0), None, Some(28.5), Some(35.0), None, Some(30.0), Some(33.5), Some(29.0),
            None, Some(34.0), Some(32.0),
        ];
        // Out of order and undated entries on purpose
        let mut dates = days(&[0, 2, 9, 5, 30, 33, 61, 62, 70, 95, 140]);
        dates[4] = None;
        dates[7] = None;

        for window in [1, 7, 31, 60] {
            let engine = MovingAverageEngine::new(window).unwrap();
            let expected = all_pairs(&values, &dates, window);
            let actual = engine.windowed_average(&values, &dates);
            assert_eq!(expected.len(), actual.len());
            for (a, e) in actual.iter().zip(&expected) {
                match (a, e) {
                    (Some(a), Some(e)) => assert!((a - e).abs() < 1e-9),
                    (None, None) => {}
                    _ => panic!("window {window}: {actual:?} vs {expected:?}"),
                }
            }
        }
    }
}
