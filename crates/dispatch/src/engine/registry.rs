//! Ordered registration table with atomic publication.
//!
//! # Role
//!
//! Holds the append-only sequence of registrations. Readers load the current snapshot
//! without locking; writers build an extended copy and publish it with a CAS retry loop.
//!
//! # Invariants
//!
//! - The overlap check and the append observe the same snapshot (see
//!   `invariants::test_concurrent_fail_registrations`).

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};

use super::{Implementation, Registration};
use crate::{InsertAction, OverridePolicy, RegisterError, ShadowingWarning, Signature};

pub(super) type Table<V, R> = Vec<Arc<Registration<V, R>>>;

pub(super) struct MethodTable<V, R> {
	snap: ArcSwap<Table<V, R>>,
}

impl<V, R> MethodTable<V, R> {
	pub(super) fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(Vec::new()),
		}
	}

	#[inline]
	pub(super) fn load(&self) -> Guard<Arc<Table<V, R>>> {
		self.snap.load()
	}

	#[inline]
	pub(super) fn len(&self) -> usize {
		self.snap.load().len()
	}

	/// Drops every registration.
	pub(super) fn reset(&self) {
		self.snap.store(Arc::new(Vec::new()));
	}

	/// Appends a registration after applying `policy` against the current snapshot.
	pub(super) fn insert(
		&self,
		signature: Signature,
		implementation: Implementation<V, R>,
		policy: OverridePolicy,
	) -> Result<InsertAction, RegisterError> {
		loop {
			let old = self.snap.load_full();

			let overlapped = if policy.checks_conflicts() {
				old.iter()
					.rev()
					.find(|r| r.signature.accepts(signature.types()))
					.map(|r| r.signature.clone())
			} else {
				None
			};

			let action = match (overlapped, policy) {
				(None, _) => InsertAction::Inserted,
				(Some(existing), OverridePolicy::Warn) => InsertAction::Shadowed(ShadowingWarning {
					incoming: signature.clone(),
					existing,
				}),
				(Some(existing), OverridePolicy::Fail) => {
					return Err(RegisterError::Conflict {
						incoming: signature,
						existing,
					});
				}
				(Some(existing), policy) => {
					return Err(RegisterError::InvalidPolicy {
						policy,
						incoming: signature,
						existing,
					});
				}
			};

			let mut table: Table<V, R> = Vec::with_capacity(old.len() + 1);
			table.extend(old.iter().cloned());
			table.push(Arc::new(Registration {
				signature: signature.clone(),
				implementation: implementation.clone(),
				ordinal: old.len() as u32,
			}));
			let next = Arc::new(table);

			let prev = self.snap.compare_and_swap(&old, next);
			if Arc::ptr_eq(&prev, &old) {
				return Ok(action);
			}
			// Lost the race; re-check against the newer snapshot.
		}
	}
}
