use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Dense identifier of a type within its universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
	/// The root type of every universe.
	pub const OBJECT: TypeId = TypeId(0);

	/// Raw index, dense from zero (the root) in definition order within a universe.
	#[inline]
	pub const fn as_u32(self) -> u32 {
		self.0
	}
}

pub(crate) struct TypeNode {
	pub(crate) id: TypeId,
	pub(crate) universe: u32,
	pub(crate) name: Box<str>,
	pub(crate) bases: Box<[TypeDesc]>,
	/// Linearization without the type itself (`mro()[1..]`).
	pub(crate) ancestors: Box<[TypeDesc]>,
}

/// Shared handle to a runtime type.
///
/// Cloning is a reference-count bump. Two handles are equal when they name the same type of
/// the same [`crate::TypeUniverse`].
#[derive(Clone)]
pub struct TypeDesc(pub(crate) Arc<TypeNode>);

impl TypeDesc {
	#[inline]
	pub fn id(&self) -> TypeId {
		self.0.id
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Direct bases in declaration order. Empty only for the root.
	#[inline]
	pub fn bases(&self) -> &[TypeDesc] {
		&self.0.bases
	}

	/// Returns true for the universe root (`object`).
	#[inline]
	pub fn is_root(&self) -> bool {
		self.0.id == TypeId::OBJECT
	}

	/// Iterates the full linearization, starting with `self`.
	pub fn mro(&self) -> impl Iterator<Item = &TypeDesc> + '_ {
		std::iter::once(self).chain(self.0.ancestors.iter())
	}

	/// Returns true if `self` is `other` or derives from it.
	pub fn is_subtype_of(&self, other: &TypeDesc) -> bool {
		self == other || self.0.ancestors.iter().any(|a| a == other)
	}

	/// The type following `self` in its linearization, or `None` for the root.
	#[inline]
	pub fn immediate_supertype(&self) -> Option<&TypeDesc> {
		self.0.ancestors.first()
	}

	#[inline]
	pub(crate) fn universe(&self) -> u32 {
		self.0.universe
	}
}

impl PartialEq for TypeDesc {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
			|| (self.0.id == other.0.id && self.0.universe == other.0.universe)
	}
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.universe.hash(state);
		self.0.id.hash(state);
	}
}

impl fmt::Display for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.name)
	}
}

impl fmt::Debug for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.0.name, self.0.id.0)
	}
}

/// A value that knows its runtime type.
pub trait Typed {
	fn runtime_type(&self) -> TypeDesc;
}

impl<T: Typed + ?Sized> Typed for &T {
	fn runtime_type(&self) -> TypeDesc {
		(**self).runtime_type()
	}
}

impl<T: Typed + ?Sized> Typed for Box<T> {
	fn runtime_type(&self) -> TypeDesc {
		(**self).runtime_type()
	}
}

impl<T: Typed + ?Sized> Typed for Arc<T> {
	fn runtime_type(&self) -> TypeDesc {
		(**self).runtime_type()
	}
}
