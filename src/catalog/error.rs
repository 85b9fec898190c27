use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The backing data could not be decoded into records.
    #[error("catalog data unavailable: {0}")]
    DataUnavailable(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::DataUnavailable(err.to_string())
    }
}
