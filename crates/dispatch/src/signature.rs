use std::fmt;

use helio_types::TypeDesc;
use smallvec::SmallVec;

/// Ordered tuple of type descriptors.
///
/// Used both for declared signatures and for the discriminant types of a call, which is also
/// the resolution cache key.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature(SmallVec<[TypeDesc; 4]>);

impl Signature {
	pub fn new(types: impl IntoIterator<Item = TypeDesc>) -> Self {
		Self(types.into_iter().collect())
	}

	#[inline]
	pub fn types(&self) -> &[TypeDesc] {
		&self.0
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if `types` has the same arity and each position is a subtype-or-equal of
	/// the declared type at that position.
	///
	/// Resolution asks this with the discriminant types; conflict detection asks it with the
	/// incoming signature against each existing one.
	pub fn accepts(&self, types: &[TypeDesc]) -> bool {
		self.0.len() == types.len()
			&& types
				.iter()
				.zip(self.0.iter())
				.all(|(actual, declared)| actual.is_subtype_of(declared))
	}
}

impl FromIterator<TypeDesc> for Signature {
	fn from_iter<I: IntoIterator<Item = TypeDesc>>(iter: I) -> Self {
		Self::new(iter)
	}
}

impl<const N: usize> From<[TypeDesc; N]> for Signature {
	fn from(types: [TypeDesc; N]) -> Self {
		Self::new(types)
	}
}

impl From<&[TypeDesc]> for Signature {
	fn from(types: &[TypeDesc]) -> Self {
		Self::new(types.iter().cloned())
	}
}

impl From<Vec<TypeDesc>> for Signature {
	fn from(types: Vec<TypeDesc>) -> Self {
		Self(SmallVec::from_vec(types))
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, ty) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			f.write_str(ty.name())?;
		}
		Ok(())
	}
}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({self})")
	}
}
