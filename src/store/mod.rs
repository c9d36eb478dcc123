//! Record persistence modules.
//!
//! The canonical in-memory record list plus its durable backing store
//! and the static seed/reference data.

pub mod record_store;
pub mod seed;

pub use record_store::{DurableStore, FileStore, RecordStore};
