//! Core types for the Patchwork particle engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! index vocabulary shared by every other crate in the workspace: the
//! inclusive [`Interval`] and strided [`Range`] domains, patch and context
//! identifiers, the [`PatchNode`] describing one patch's slice of a global
//! index space, and the delete-strategy tags that select a compaction
//! algorithm.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod interval;
pub mod method;
pub mod node;

pub use error::DomainError;
pub use id::{AttributeId, ContextId, PatchId};
pub use interval::{Interval, Range};
pub use method::{BackFill, DeleteMethod, DeleteStrategy, ShiftUp};
pub use node::PatchNode;
