//! Index-set domains for Patchwork engines.
//!
//! This crate defines the [`IndexSource`] trait, the capability set every
//! destroy, copy, and view operation accepts to name a subset of an
//! engine's elements, along with its concrete adapters.
//!
//! # Adapters
//!
//! - [`Interval`] and [`Range`]: contiguous and strided ranges (from
//!   `patchwork-core`)
//! - [`IndirectionList`]: an owning list of arbitrary indices
//! - [`IteratorPairDomain`]: a non-owning view over a borrowed sequence,
//!   for kill-lists that already live in some other container
//!
//! `first`/`last` are positional (sequence order); `min`/`max` are by value.
//! No ordering is assumed by any adapter.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod indirection;
pub mod iter_pair;
pub mod source;

pub use indirection::IndirectionList;
pub use iter_pair::IteratorPairDomain;
pub use patchwork_core::{Interval, Range};
pub use source::IndexSource;
