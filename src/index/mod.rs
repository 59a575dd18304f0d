//! Derived structures: tag index, reference graph, and consistency checks.
//!
//! None of these are persisted. They are rebuilt from a full store scan
//! and kept current by the note service.

mod consistency;
mod derived;
mod graph;
mod snapshot;
mod tag_index;

pub use consistency::{ConsistencyError, ConsistencyReport};
pub use derived::DerivedState;
pub use graph::ReferenceGraph;
pub use snapshot::Snapshot;
pub use tag_index::{TagIndex, TagWithCount};
