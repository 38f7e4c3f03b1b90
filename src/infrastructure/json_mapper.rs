// Mapper to convert domain models to JSON wire types
use crate::domain::chart::{ChartFrame, ChartPoint, EntityView};
use crate::domain::date_resolver::portuguese_date_text;
use crate::domain::ranking::RankedEntry;
use crate::domain::summary::PollSummary;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDto {
    pub x: f64,
    pub y: f64,
    pub source_label: String,
    pub source_date_text: String,
    /// Tooltip title, month names spelled out in Portuguese
    pub date_label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityViewDto {
    pub name: String,
    pub color: String,
    pub hidden: bool,
    pub line: Vec<PointDto>,
    pub points: Vec<PointDto>,
}

#[derive(Debug, Serialize)]
pub struct RankedDto {
    pub name: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrameDto {
    pub label: String,
    pub start_percent: f64,
    pub end_percent: f64,
    pub visible_count: usize,
    pub entities: Vec<EntityViewDto>,
    pub ranking: Vec<RankedDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub name: String,
    pub color: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub poll_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

pub fn frame_to_json(frame: ChartFrame) -> ChartFrameDto {
    ChartFrameDto {
        label: frame.label,
        start_percent: frame.start_percent,
        end_percent: frame.end_percent,
        visible_count: frame.visible_count,
        entities: frame.views.into_iter().map(view_to_json).collect(),
        ranking: ranking_to_json(frame.ranking),
    }
}

pub fn ranking_to_json(ranking: Vec<RankedEntry>) -> Vec<RankedDto> {
    ranking
        .into_iter()
        .map(|r| RankedDto {
            name: r.name,
            value: r.value,
            color: r.color,
        })
        .collect()
}

pub fn summary_to_json(summary: Vec<PollSummary>) -> Vec<SummaryDto> {
    summary
        .into_iter()
        .map(|s| SummaryDto {
            name: s.name,
            color: s.color,
            mean: s.mean,
            min: s.min,
            max: s.max,
            poll_count: s.poll_count,
        })
        .collect()
}

fn view_to_json(view: EntityView) -> EntityViewDto {
    EntityViewDto {
        name: view.name,
        color: view.color,
        hidden: view.hidden,
        line: view.line.into_iter().map(point_to_json).collect(),
        points: view.points.into_iter().map(point_to_json).collect(),
    }
}

fn point_to_json(point: ChartPoint) -> PointDto {
    PointDto {
        x: point.x,
        y: point.y,
        date_label: format!(
            "{} - {}",
            point.source_label,
            portuguese_date_text(&point.source_date_text)
        ),
        source_label: point.source_label,
        source_date_text: point.source_date_text,
    }
}
