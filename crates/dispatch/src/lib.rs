#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Runtime multiple dispatch.
//!
//! # Purpose
//!
//! A [`MultiMethod`] selects, among registered implementations, the one whose declared
//! [`Signature`] accepts the runtime types of a call. It supports deliberate overriding with
//! conflict detection, memoized resolution, and cooperative delegation to the implementation
//! that would have run for a less-derived argument.
//!
//! # Mental Model
//!
//! 1. **Construction:** An engine is bound once to an extractor that maps a [`Call`] to the
//!    arguments whose types drive resolution (the discriminants).
//! 2. **Registration:** [`MultiMethod::register`] appends `(signature, implementation)` under
//!    an [`OverridePolicy`]. [`MultiMethod::define`] is the convenience form and also clears
//!    the resolution cache.
//! 3. **Invocation:** [`MultiMethod::invoke`] extracts discriminants, resolves (cache first,
//!    then a reverse scan of registrations) and calls the winner with the original call.
//! 4. **Delegation:** [`MultiMethod::invoke_next`] replaces each [`Arg::Next`] marker's type
//!    with the immediate supertype of its context and forwards the unwrapped values.
//!
//! # Precedence Contract
//!
//! Recency wins. Registrations are scanned newest first and the first signature that accepts
//! the discriminant types is selected. Specificity plays no part.
//!
//! - Enforced in: [`crate::engine::MultiMethod::resolve`]
//! - Tested by: `engine::tests::test_recency_wins_over_specificity`
//! - Failure symptom: an older, broader handler intercepts calls meant for a newer one.
//!
//! # Invariants
//!
//! - The cache is pure memoization.
//!   - Enforced in: [`crate::engine::MultiMethod::resolve`] (cache keyed by exact type tuple).
//!   - Tested by: `engine::invariants::test_cache_transparency`
//!   - Failure symptom: results differ between warm and cold calls.
//!   - Exception: [`MultiMethod::register`] does not clear the cache unless
//!     [`EngineConfig::clear_cache_on_register`] is set, so a tuple resolved before a new
//!     registration keeps its old answer until [`MultiMethod::clear_cache`].
//!
//! - A Fail-policy registration must never coexist with an overlapping signature.
//!   - Enforced in: `engine::registry::MethodTable::insert` (check and append in one CAS).
//!   - Tested by: `engine::invariants::test_concurrent_fail_registrations`
//!   - Failure symptom: two racing registrations both succeed.
//!
//! - No lock is held while an implementation runs.
//!   - Enforced in: [`crate::engine::MultiMethod::invoke`],
//!     [`crate::engine::MultiMethod::invoke_next`].
//!   - Tested by: `engine::tests::test_invoke_next_from_inside_handler`
//!   - Failure symptom: deadlock when a handler delegates.
//!
//! - A cache clear that follows a registration is never undone by an in-flight resolve.
//!   - Enforced in: `engine::cache::ResolutionCache::insert_if_current` (generation read
//!     before the table is loaded, checked under the write lock); clearing registrations
//!     clear after the new table is published.
//!   - Tested by: `engine::invariants::test_clearing_registration_not_undone_by_inflight_resolve`
//!   - Failure symptom: a type tuple keeps resolving to the superseded implementation after
//!     [`MultiMethod::define`] returns.

mod call;
mod config;
mod engine;
mod error;
pub mod extract;
mod policy;
mod signature;

pub use call::{Arg, Call};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Implementation, MethodDef, MultiMethod};
pub use error::{DispatchError, InsertAction, RegisterError, ShadowingWarning};
pub use extract::Extractor;
pub use helio_types::{TypeDesc, TypeUniverse, Typed};
pub use policy::{OverridePolicy, ParsePolicyError};
pub use signature::Signature;
