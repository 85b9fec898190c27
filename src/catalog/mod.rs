//! catalog: the read-only inventory the RPC service answers from.
//!
//! The service only depends on the [`Catalog`] trait, so any source of
//! records (the embedded [`StaticCatalog`], or a test double) can back it.

mod error;
mod record;
mod static_catalog;

pub use error::CatalogError;
pub use record::CarRecord;
pub use static_catalog::StaticCatalog;

/// Read-only access to inventory records.
///
/// Implementations must return records in a deterministic order and must
/// never mutate them after construction.
pub trait Catalog: Send + Sync + 'static {
    /// All records, in catalog order.
    fn fetch_all(&self) -> Result<Vec<CarRecord>, CatalogError>;

    /// The first record whose `id` equals `id`, if any.
    ///
    /// A linear scan; catalogs are small and fixed.
    fn fetch_by_id(&self, id: i64) -> Result<Option<CarRecord>, CatalogError> {
        Ok(self.fetch_all()?.into_iter().find(|car| car.id == id))
    }

    /// The first record with this exact make and model, if any.
    fn fetch_by_model(&self, make: &str, model: &str) -> Result<Option<CarRecord>, CatalogError> {
        Ok(self
            .fetch_all()?
            .into_iter()
            .find(|car| car.make == make && car.model == model))
    }
}

impl<C: Catalog> Catalog for std::sync::Arc<C> {
    fn fetch_all(&self) -> Result<Vec<CarRecord>, CatalogError> {
        (**self).fetch_all()
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<CarRecord>, CatalogError> {
        (**self).fetch_by_id(id)
    }

    fn fetch_by_model(&self, make: &str, model: &str) -> Result<Option<CarRecord>, CatalogError> {
        (**self).fetch_by_model(make, model)
    }
}
