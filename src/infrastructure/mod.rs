// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_feed_repository;
pub mod http_feed_repository;
pub mod http_response;
pub mod json_mapper;
pub mod json_preference_store;
