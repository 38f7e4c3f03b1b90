// Error taxonomy for loading and recomputing poll trends
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrendError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrendError {
    /// A feed could not be fetched or parsed
    #[error("ingestion failed: {0}")]
    Ingestion(String),

    /// The precomputed payload does not line up with the records feed
    #[error("payload misaligned: {records} records but {payload} payload dates")]
    PayloadMisaligned { records: usize, payload: usize },

    /// Not a single record carried a resolvable date
    #[error("no record has a resolvable date")]
    NoValidDates,

    #[error("window must be a positive number of days, got {0}")]
    InvalidWindow(i64),

    #[error("unknown entity: {0}")]
    UnknownEntity(String),
}

impl TrendError {
    /// Ingestion-class errors abort chart construction entirely
    pub fn is_ingestion(&self) -> bool {
        matches!(
            self,
            TrendError::Ingestion(_) | TrendError::PayloadMisaligned { .. } | TrendError::NoValidDates
        )
    }
}
