// Domain layer - Poll data, smoothing and range math
pub mod chart;
pub mod date_resolver;
pub mod poll;
pub mod range;
pub mod ranking;
pub mod smoothing;
pub mod summary;
