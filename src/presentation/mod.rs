// Presentation layer - HTTP surface for the chart front-end
pub mod app_state;
pub mod handlers;
pub mod router;
