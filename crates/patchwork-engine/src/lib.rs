//! Resizable single-patch storage engines for Patchwork.
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T> (user-facing facade)
//! └── DynamicEngine<T> (domain + patch + generation)
//!     └── SharedBuffer<T> (Arc<Vec<T>>, copy-on-write)
//!
//! DynamicView / DynamicViewMut   borrowed strided windows
//! ViewHandle                     detached, generation-checked view
//! ```
//!
//! Every structural change (create, destroy) goes through
//! [`SharedBuffer::make_unique`], so a buffer observed by another engine copy
//! is never resized in place. Destroys name their victims with any
//! [`IndexSource`](patchwork_domain::IndexSource) and compact the buffer with
//! one of the [`DeleteMethod`](patchwork_core::DeleteMethod) algorithms.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod buffer;
mod compact;
pub mod dynamic;
pub mod engine;
pub mod error;
pub mod view;

pub use array::DynamicArray;
pub use buffer::SharedBuffer;
pub use compact::KillIndexing;
pub use dynamic::DynamicEngine;
pub use engine::{Engine, EngineKind, EngineMut};
pub use error::EngineError;
pub use view::{DynamicView, DynamicViewMut, ViewHandle};
