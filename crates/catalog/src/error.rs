//! Error types for the syncat-catalog crate.

/// Error type for all fallible operations in the syncat-catalog crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// Returned when an event's `catalog_id` does not name one of the
    /// forecast's synthetic catalogs.
    #[error("catalog id {catalog_id} out of range for {n_catalogs} synthetic catalog(s)")]
    CatalogIdOutOfRange {
        /// The offending catalog id.
        catalog_id: i64,
        /// Number of synthetic catalogs in the forecast.
        n_catalogs: usize,
    },
}
