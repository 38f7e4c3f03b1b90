// Latest-trend snapshot ranking
use super::poll::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Rank entities by the last value of their full-range smoothed series.
///
/// Entities with no final value are dropped. Ties keep roster order.
pub fn rank_latest<'a, I>(series: I) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = (&'a Entity, &'a [Option<f64>])>,
{
    let mut ranked: Vec<RankedEntry> = series
        .into_iter()
        .filter_map(|(entity, smoothed)| {
            let value = (*smoothed.last()?)?;
            Some(RankedEntry {
                name: entity.name.clone(),
                value,
                color: entity.color.clone(),
            })
        })
        .collect();

    // sort_by is stable, so equal values stay in declaration order
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked
}
