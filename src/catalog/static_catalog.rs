use std::sync::Arc;

use super::{Catalog, CarRecord, CatalogError};

const BUILTIN_CARS: &str = include_str!("cars.json");

/// Read-only catalog decoded once from a JSON document.
///
/// Clones share the same record storage. Nothing is ever written after
/// construction, so concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    records: Arc<[CarRecord]>,
}

impl StaticCatalog {
    /// The six-record example inventory shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CARS)
    }

    /// Decode a JSON array of `{ "id", "make", "model" }` objects.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CarRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<CarRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn fetch_all(&self) -> Result<Vec<CarRecord>, CatalogError> {
        Ok(self.records.to_vec())
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<CarRecord>, CatalogError> {
        Ok(self.records.iter().find(|car| car.id == id).cloned())
    }
}
