//! The dispatch engine.
//!
//! Registry, cache, resolver and delegator are one unit: they share the registration
//! snapshot and the cache, and differ only in how discriminant types are computed.

use std::sync::Arc;

use helio_types::{TypeDesc, Typed};

use crate::extract::Extractor;
use crate::{
	Arg, Call, DispatchError, EngineConfig, InsertAction, OverridePolicy, RegisterError, Signature,
};

mod cache;
mod registry;

use cache::ResolutionCache;
use registry::MethodTable;

#[cfg(test)]
pub(crate) mod test_fixtures;


#[cfg(test)]
pub(crate) mod invariants;

/// A registered implementation.
///
/// Receives the engine (for [`MultiMethod::invoke_next`]) and the call as given to
/// [`MultiMethod::invoke`], not the discriminants.
pub type Implementation<V, R> = Arc<dyn Fn(&MultiMethod<V, R>, &Call<V>) -> R + Send + Sync>;

/// One `(signature, implementation)` pair.
pub(crate) struct Registration<V, R> {
	pub(crate) signature: Signature,
	pub(crate) implementation: Implementation<V, R>,
	/// Position in registration order.
	pub(crate) ordinal: u32,
}

/// Runtime multiple-dispatch engine.
///
/// # Concurrency
///
/// - **Reads:** registrations are loaded from an atomic snapshot; the cache is behind a
///   read-write lock that is released before any implementation runs.
/// - **Writes:** registrations publish with a CAS retry loop, so overlap checks are never
///   lost to a concurrent append. Clearing registrations clear the cache only after the new
///   table is published, and a resolve that started before that clear does not cache its
///   result.
pub struct MultiMethod<V, R> {
	config: EngineConfig,
	extractor: Extractor<V>,
	methods: MethodTable<V, R>,
	cache: ResolutionCache<V, R>,
}

impl<V, R> MultiMethod<V, R>
where
	V: Typed + Clone,
{
	/// Creates an engine with default settings bound to `extractor`.
	pub fn new<F>(extractor: F) -> Self
	where
		F: for<'a> Fn(&'a Call<V>) -> Vec<&'a Arg<V>> + Send + Sync + 'static,
	{
		Self::with_config(EngineConfig::default(), extractor)
	}

	pub fn with_config<F>(config: EngineConfig, extractor: F) -> Self
	where
		F: for<'a> Fn(&'a Call<V>) -> Vec<&'a Arg<V>> + Send + Sync + 'static,
	{
		Self {
			config,
			extractor: Box::new(extractor),
			methods: MethodTable::new(),
			cache: ResolutionCache::new(),
		}
	}

	#[inline]
	pub fn label(&self) -> &str {
		&self.config.label
	}

	#[inline]
	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Appends an implementation for `signature`.
	///
	/// Leaves the resolution cache untouched unless
	/// [`EngineConfig::clear_cache_on_register`] is set: a type tuple resolved before this
	/// call keeps resolving to its cached implementation even if `signature` would now win.
	/// Use [`Self::define`] or [`Self::clear_cache`] when that matters.
	pub fn register<F>(
		&self,
		signature: impl Into<Signature>,
		policy: OverridePolicy,
		implementation: F,
	) -> Result<InsertAction, RegisterError>
	where
		F: Fn(&MultiMethod<V, R>, &Call<V>) -> R + Send + Sync + 'static,
	{
		self.register_arc(signature.into(), policy, Arc::new(implementation))
	}

	/// [`Self::register`] for an already shared implementation.
	pub fn register_arc(
		&self,
		signature: Signature,
		policy: OverridePolicy,
		implementation: Implementation<V, R>,
	) -> Result<InsertAction, RegisterError> {
		if signature.is_empty() {
			return Err(RegisterError::EmptySignature);
		}
		let action = self
			.methods
			.insert(signature.clone(), implementation, policy)?;
		if self.config.clear_cache_on_register {
			self.cache.clear();
		}
		match &action {
			InsertAction::Inserted => tracing::debug!(
				engine = %self.config.label,
				%signature,
				%policy,
				"registered definition",
			),
			InsertAction::Shadowed(warning) => tracing::warn!(
				engine = %self.config.label,
				incoming = %warning.incoming,
				existing = %warning.existing,
				"definition overrides prior definition",
			),
		}
		Ok(action)
	}

	/// Starts the convenience registration form. Installing through it clears the cache.
	pub fn define(&self, signature: impl Into<Signature>) -> MethodDef<'_, V, R> {
		MethodDef {
			engine: self,
			signature: signature.into(),
			policy: self.config.default_policy,
		}
	}

	/// Calls the implementation selected by the runtime types of `call`'s discriminants.
	///
	/// Delegation markers are transparent here: they dispatch on the wrapped value's own type
	/// and are forwarded as given.
	pub fn invoke(&self, call: &Call<V>) -> Result<R, DispatchError> {
		let types: Signature = (self.extractor)(call)
			.into_iter()
			.map(|arg| arg.value().runtime_type())
			.collect();
		let implementation = self.resolve(&types)?;
		Ok((*implementation)(self, call))
	}

	/// Calls what would have run for a less-derived version of the marked arguments.
	///
	/// Each [`Arg::Next`] discriminant resolves as the immediate supertype of its context, and
	/// every marker (positional or named) is replaced by its value in the forwarded call.
	pub fn invoke_next(&self, call: &Call<V>) -> Result<R, DispatchError> {
		let types = (self.extractor)(call)
			.into_iter()
			.map(delegated_type)
			.collect::<Result<Signature, _>>()?;
		let implementation = self.resolve(&types)?;
		let forwarded = call.unwrap_markers();
		Ok((*implementation)(self, &forwarded))
	}

	/// Finds the implementation for an exact discriminant type tuple.
	///
	/// Consults the cache, otherwise scans registrations newest first and caches the first
	/// whose signature accepts `types`.
	pub fn resolve(&self, types: &Signature) -> Result<Implementation<V, R>, DispatchError> {
		if let Some(hit) = self.cache.get(types) {
			tracing::trace!(engine = %self.config.label, %types, "resolution cache hit");
			return Ok(hit);
		}

		let generation = self.cache.generation();
		let methods = self.methods.load();
		let Some(found) = methods
			.iter()
			.rev()
			.find(|r| r.signature.accepts(types.types()))
		else {
			return Err(DispatchError::NoMatch {
				types: types.clone(),
			});
		};

		tracing::trace!(
			engine = %self.config.label,
			%types,
			signature = %found.signature,
			"resolution cache miss",
		);
		let implementation = found.implementation.clone();
		self.cache
			.insert_if_current(types.clone(), implementation.clone(), generation);
		Ok(implementation)
	}

	/// Drops every memoized resolution.
	pub fn clear_cache(&self) {
		self.cache.clear();
	}

	/// Drops every registration and the cache.
	pub fn reset(&self) {
		self.methods.reset();
		self.cache.clear();
		tracing::debug!(engine = %self.config.label, "engine reset");
	}

	/// Number of registrations.
	pub fn len(&self) -> usize {
		self.methods.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Registered signatures in registration order.
	pub fn signatures(&self) -> Vec<Signature> {
		self.methods
			.load()
			.iter()
			.map(|r| r.signature.clone())
			.collect()
	}

	/// Number of memoized type tuples.
	pub fn cache_len(&self) -> usize {
		self.cache.len()
	}
}

impl<V, R> std::fmt::Debug for MultiMethod<V, R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MultiMethod")
			.field("label", &self.config.label)
			.field("registrations", &self.methods.len())
			.field("cached", &self.cache.len())
			.finish()
	}
}

fn delegated_type<V: Typed>(arg: &Arg<V>) -> Result<TypeDesc, DispatchError> {
	match arg {
		Arg::Value(value) => Ok(value.runtime_type()),
		Arg::Next { value, context } => {
			let own = value.runtime_type();
			if !own.is_subtype_of(context) {
				return Err(DispatchError::ContextMismatch {
					value_type: own,
					context: context.clone(),
				});
			}
			context
				.immediate_supertype()
				.cloned()
				.ok_or_else(|| DispatchError::NoSupertype {
					context: context.clone(),
				})
		}
	}
}

/// Pending registration started by [`MultiMethod::define`].
#[must_use = "nothing is registered until `implement` is called"]
pub struct MethodDef<'a, V, R> {
	engine: &'a MultiMethod<V, R>,
	signature: Signature,
	policy: OverridePolicy,
}

impl<V, R> MethodDef<'_, V, R>
where
	V: Typed + Clone,
{
	pub fn policy(mut self, policy: OverridePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Registers `implementation`, then clears the engine's cache.
	pub fn implement<F>(self, implementation: F) -> Result<InsertAction, RegisterError>
	where
		F: Fn(&MultiMethod<V, R>, &Call<V>) -> R + Send + Sync + 'static,
	{
		let action = self
			.engine
			.register(self.signature, self.policy, implementation)?;
		self.engine.clear_cache();
		Ok(action)
	}
}
