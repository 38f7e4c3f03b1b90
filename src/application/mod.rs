// Application layer - Use cases over the poll feeds
pub mod feed_repository;
pub mod preference_service;
pub mod trend_service;
