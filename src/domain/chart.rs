// Chart frame domain models handed to the presentation layer
use super::ranking::RankedEntry;

/// Source label used for points on the smoothed line
pub const MOVING_AVERAGE_LABEL: &str = "Média móvel";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub source_label: String,
    pub source_date_text: String,
}

impl ChartPoint {
    pub fn new(x: f64, y: f64, source_label: String, source_date_text: String) -> Self {
        Self {
            x,
            y,
            source_label,
            source_date_text,
        }
    }
}

/// Everything drawn for one entity: smoothed line and raw poll points
#[derive(Debug, Clone)]
pub struct EntityView {
    pub name: String,
    pub color: String,
    pub hidden: bool,
    pub line: Vec<ChartPoint>,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone)]
pub struct ChartFrame {
    pub label: String,
    pub start_percent: f64,
    pub end_percent: f64,
    pub visible_count: usize,
    pub views: Vec<EntityView>,
    pub ranking: Vec<RankedEntry>,
}
