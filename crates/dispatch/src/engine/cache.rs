use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use super::Implementation;
use crate::Signature;

/// Exact type tuple to resolved implementation.
///
/// Pure memoization: entries may be dropped or computed twice under a race without changing
/// any result. Every [`Self::clear`] bumps a generation counter; a resolution computed
/// against an older generation is discarded instead of cached, so a clear that follows a
/// registration cannot be undone by a resolve that read the previous table.
pub(super) struct ResolutionCache<V, R> {
	map: RwLock<HashMap<Signature, Implementation<V, R>>>,
	generation: AtomicU64,
}

impl<V, R> ResolutionCache<V, R> {
	pub(super) fn new() -> Self {
		Self {
			map: RwLock::new(HashMap::default()),
			generation: AtomicU64::new(0),
		}
	}

	/// Returns a clone so no lock outlives the lookup.
	#[inline]
	pub(super) fn get(&self, key: &Signature) -> Option<Implementation<V, R>> {
		self.map.read().get(key).cloned()
	}

	/// Current generation. Must be read before loading the registration table that a
	/// subsequent [`Self::insert_if_current`] is derived from.
	#[inline]
	pub(super) fn generation(&self) -> u64 {
		self.generation.load(Ordering::SeqCst)
	}

	/// Caches `implementation` unless the cache was cleared since `seen` was read.
	///
	/// Returns whether the entry was stored.
	pub(super) fn insert_if_current(
		&self,
		key: Signature,
		implementation: Implementation<V, R>,
		seen: u64,
	) -> bool {
		let mut map = self.map.write();
		if self.generation.load(Ordering::SeqCst) != seen {
			return false;
		}
		map.insert(key, implementation);
		true
	}

	pub(super) fn clear(&self) {
		let mut map = self.map.write();
		map.clear();
		self.generation.fetch_add(1, Ordering::SeqCst);
	}

	pub(super) fn len(&self) -> usize {
		self.map.read().len()
	}
}
