//! Runtime type descriptors.
//!
//! # Purpose
//!
//! Dispatch in `helio-dispatch` is driven by subtype queries over values that already
//! exist at runtime. This crate supplies the descriptor those queries run against, so the
//! engine never touches a host language's reflection API.
//!
//! # Mental Model
//!
//! 1. **Definition:** A [`TypeUniverse`] owns a root type (`object`) and allocates every
//!    other type through [`TypeUniverse::define`], which computes the type's C3
//!    linearization once.
//! 2. **Handles:** Each type is a [`TypeDesc`], a cheap clone of a shared node. Equality and
//!    hashing use the dense [`TypeId`] plus the owning universe.
//! 3. **Queries:** [`TypeDesc::is_subtype_of`] is a scan of the cached linearization;
//!    [`TypeDesc::immediate_supertype`] is its second entry.
//! 4. **Values:** Anything implementing [`Typed`] reports its runtime type.
//!
//! # Invariants
//!
//! - Linearizations are immutable after definition; a base must exist before its subtypes.
//! - `is_subtype_of` is reflexive and transitive.
//! - Types from different universes never compare equal and cannot be mixed as bases.

mod error;
mod mro;
mod ty;
mod universe;

pub use error::TypeError;
pub use ty::{TypeDesc, TypeId, Typed};
pub use universe::{ROOT_NAME, TypeUniverse};
