//! Dispatch key extractors.
//!
//! An extractor maps a [`Call`] to the arguments whose runtime types drive resolution. It is
//! fixed when the engine is built and must be deterministic and side-effect free. The
//! selected arguments need not be the literal positional list.

use crate::{Arg, Call};

/// Boxed extractor as stored by [`crate::MultiMethod`].
pub type Extractor<V> = Box<dyn for<'a> Fn(&'a Call<V>) -> Vec<&'a Arg<V>> + Send + Sync>;

/// Every positional argument, in order.
pub fn positional<V>(call: &Call<V>) -> Vec<&Arg<V>> {
	call.args.iter().collect()
}

/// The first `n` positional arguments.
pub fn leading<V>(
	n: usize,
) -> impl for<'a> Fn(&'a Call<V>) -> Vec<&'a Arg<V>> + Send + Sync + Clone {
	bind(move |call| call.args.iter().take(n).collect())
}

/// Positional arguments followed by the named arguments listed in `names`, skipping any
/// that are absent.
pub fn positional_and_named<V>(
	names: &'static [&'static str],
) -> impl for<'a> Fn(&'a Call<V>) -> Vec<&'a Arg<V>> + Send + Sync + Clone {
	bind(move |call| {
		call.args
			.iter()
			.chain(names.iter().filter_map(|n| call.kwargs.get(*n)))
			.collect()
	})
}

/// Pins a closure to the higher-ranked extractor signature.
fn bind<V, F>(f: F) -> F
where
	F: for<'a> Fn(&'a Call<V>) -> Vec<&'a Arg<V>>,
{
	f
}
