//! Catalog-backed fallback pool (§4.6, §4.13 step 5).
//!
//! `catalog_fallback` (§4.6) needs a candidate pool to filter and sort
//! locally; a vector-index failure must not also depend on the vector index
//! for that pool, so this is its own small collaborator: a synchronous,
//! already-in-memory snapshot, refreshed by whoever owns it on whatever
//! schedule it likes. No network call is reachable from this trait's shape.

use crate::types::{Candidate, Domain};

/// Supplies the local candidate snapshot the catalog-backed fallback sorts
/// and filters. Implementations are expected to hold this in memory (e.g. a
/// periodically-refreshed copy of the catalog) rather than fetch it per call.
pub trait CatalogPool: Send + Sync {
    fn snapshot(&self, domain: Domain) -> Vec<Candidate>;
}

/// A `CatalogPool` with nothing in it. Used where no fallback pool has been
/// wired up; the fallback path then degrades to an empty result rather than
/// panicking or reaching for the network.
pub struct EmptyCatalogPool;

impl CatalogPool for EmptyCatalogPool {
    fn snapshot(&self, _domain: Domain) -> Vec<Candidate> {
        Vec::new()
    }
}
