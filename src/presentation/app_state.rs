// Application state for HTTP handlers
use crate::application::preference_service::PreferenceService;
use crate::application::trend_service::TrendService;

#[derive(Clone)]
pub struct AppState {
    /// The loaded chart, or the message explaining why loading failed
    pub trends: Result<TrendService, String>,
    pub preferences: PreferenceService,
}
