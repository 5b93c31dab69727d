//! Built-in demo collaborators: a small, in-memory candidate pool standing
//! in for the real vector index / catalog API the server would talk to in
//! production, so `rec-service` boots and answers requests with zero
//! external dependencies. Modeled on the catalog crate's own built-in
//! question set (always constructible, never empty, no I/O).

mod catalog;

pub use catalog::{DemoCatalogPool, DemoCatalogProvider, DemoVectorIndex};
