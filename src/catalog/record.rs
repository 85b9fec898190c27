use serde::{Deserialize, Serialize};

/// One inventory item.
///
/// Real records always carry a positive `id`; zero never matches anything
/// in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: i64,
    pub make: String,
    pub model: String,
}

impl CarRecord {
    pub fn new(id: i64, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id,
            make: make.into(),
            model: model.into(),
        }
    }
}
