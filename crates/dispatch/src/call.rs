use helio_types::TypeDesc;
use indexmap::IndexMap;

/// One call argument, optionally marked for delegation.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<V> {
	/// A plain value; dispatches on its own runtime type.
	Value(V),
	/// Delegation marker: resolve against the immediate supertype of `context`, forwarding
	/// `value` itself.
	Next { value: V, context: TypeDesc },
}

impl<V> Arg<V> {
	/// Marks `value` for delegation from the implementation written for `context`.
	pub fn next(context: &TypeDesc, value: V) -> Self {
		Self::Next {
			value,
			context: context.clone(),
		}
	}

	/// The wrapped value, marker or not.
	#[inline]
	pub fn value(&self) -> &V {
		match self {
			Self::Value(v) | Self::Next { value: v, .. } => v,
		}
	}

	#[inline]
	pub fn into_value(self) -> V {
		match self {
			Self::Value(v) | Self::Next { value: v, .. } => v,
		}
	}

	#[inline]
	pub fn is_marker(&self) -> bool {
		matches!(self, Self::Next { .. })
	}
}

impl<V> From<V> for Arg<V> {
	fn from(value: V) -> Self {
		Self::Value(value)
	}
}

/// Positional and named arguments of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call<V> {
	pub args: Vec<Arg<V>>,
	pub kwargs: IndexMap<String, Arg<V>>,
}

impl<V> Call<V> {
	pub fn new() -> Self {
		Self {
			args: Vec::new(),
			kwargs: IndexMap::new(),
		}
	}

	/// Builds a call from plain positional values.
	pub fn positional(values: impl IntoIterator<Item = V>) -> Self {
		Self {
			args: values.into_iter().map(Arg::Value).collect(),
			kwargs: IndexMap::new(),
		}
	}

	/// Appends a positional argument.
	pub fn arg(mut self, arg: impl Into<Arg<V>>) -> Self {
		self.args.push(arg.into());
		self
	}

	/// Sets a named argument, replacing any previous value under `name`.
	pub fn kwarg(mut self, name: impl Into<String>, arg: impl Into<Arg<V>>) -> Self {
		self.kwargs.insert(name.into(), arg.into());
		self
	}

	/// Value of the positional argument at `index`.
	pub fn get(&self, index: usize) -> Option<&V> {
		self.args.get(index).map(Arg::value)
	}

	/// Value of the named argument `name`.
	pub fn named(&self, name: &str) -> Option<&V> {
		self.kwargs.get(name).map(Arg::value)
	}

	/// Returns true if any positional or named argument is a delegation marker.
	pub fn has_markers(&self) -> bool {
		self.args.iter().chain(self.kwargs.values()).any(Arg::is_marker)
	}

	/// Copy of this call with every marker replaced by its wrapped value.
	pub(crate) fn unwrap_markers(&self) -> Self
	where
		V: Clone,
	{
		let strip = |arg: &Arg<V>| Arg::Value(arg.value().clone());
		Self {
			args: self.args.iter().map(strip).collect(),
			kwargs: self
				.kwargs
				.iter()
				.map(|(k, v)| (k.clone(), strip(v)))
				.collect(),
		}
	}
}

impl<V> Default for Call<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> FromIterator<Arg<V>> for Call<V> {
	fn from_iter<I: IntoIterator<Item = Arg<V>>>(iter: I) -> Self {
		Self {
			args: iter.into_iter().collect(),
			kwargs: IndexMap::new(),
		}
	}
}
