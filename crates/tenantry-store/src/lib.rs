//! Tenantry Store — in-memory implementation of the `tenantry-core`
//! store traits.
//!
//! This backend is a single-instance simulation: four maps behind one
//! `RwLock`. A multi-worker deployment must substitute a shared,
//! transactionally consistent store implementing the same traits.

mod memory;

pub use memory::MemoryStore;
