//! Shared foundational types used across the voxel place-and-route toolchain.
//!
//! This crate provides interned identifiers, content hashing, and the
//! common result type used to separate internal bugs from user-facing
//! diagnostics.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use result::{InternalError, PnrResult};
