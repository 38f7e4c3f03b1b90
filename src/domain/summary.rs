// Descriptive statistics over an entity's raw poll values
use super::poll::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct PollSummary {
    pub name: String,
    pub color: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub poll_count: usize,
}

/// Mean, min and max of the non-null raw values.
///
/// Returns `None` when the entity appears in no poll.
pub fn summarize(entity: &Entity, raw: &[Option<f64>]) -> Option<PollSummary> {
    let values: Vec<f64> = raw.iter().flatten().copied().collect();
    if values.is_empty() {
        return None;
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    Some(PollSummary {
        name: entity.name.clone(),
        color: entity.color.clone(),
        mean: values.iter().sum::<f64>() / values.len() as f64,
        min,
        max,
        poll_count: values.len(),
    })
}
