use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::mro::{self, MroError};
use crate::ty::{TypeId, TypeNode};
use crate::{TypeDesc, TypeError};

static NEXT_UNIVERSE: AtomicU32 = AtomicU32::new(0);

/// Name of the root type every universe starts with.
pub const ROOT_NAME: &str = "object";

/// Allocator and name index for one family of related types.
pub struct TypeUniverse {
	id: u32,
	root: TypeDesc,
	types: RwLock<HashMap<Box<str>, TypeDesc>>,
}

impl TypeUniverse {
	pub fn new() -> Self {
		let id = NEXT_UNIVERSE.fetch_add(1, Ordering::Relaxed);
		let root = TypeDesc(Arc::new(TypeNode {
			id: TypeId::OBJECT,
			universe: id,
			name: ROOT_NAME.into(),
			bases: Box::new([]),
			ancestors: Box::new([]),
		}));
		let mut types = HashMap::default();
		types.insert(Box::from(ROOT_NAME), root.clone());
		Self {
			id,
			root,
			types: RwLock::new(types),
		}
	}

	/// The root type; every other type derives from it.
	#[inline]
	pub fn object(&self) -> &TypeDesc {
		&self.root
	}

	/// Defines a new type deriving from `bases` (the root when empty).
	pub fn define(&self, name: &str, bases: &[TypeDesc]) -> Result<TypeDesc, TypeError> {
		let bases: Vec<TypeDesc> = if bases.is_empty() {
			vec![self.root.clone()]
		} else {
			bases.to_vec()
		};

		if let Some(foreign) = bases.iter().find(|b| b.universe() != self.id) {
			return Err(TypeError::ForeignBase {
				name: name.to_string(),
				base: foreign.name().to_string(),
			});
		}

		let ancestors = mro::linearize(&bases).map_err(|e| match e {
			MroError::DuplicateBase(base) => TypeError::DuplicateBase {
				name: name.to_string(),
				base: base.name().to_string(),
			},
			MroError::Inconsistent => TypeError::InconsistentMro {
				name: name.to_string(),
				bases: bases
					.iter()
					.map(TypeDesc::name)
					.collect::<Vec<_>>()
					.join(", "),
			},
		})?;

		let mut types = self.types.write();
		if types.contains_key(name) {
			return Err(TypeError::DuplicateName {
				name: name.to_string(),
			});
		}

		let ty = TypeDesc(Arc::new(TypeNode {
			id: TypeId(types.len() as u32),
			universe: self.id,
			name: name.into(),
			bases: bases.into_boxed_slice(),
			ancestors: ancestors.into_boxed_slice(),
		}));
		types.insert(Box::from(name), ty.clone());
		Ok(ty)
	}

	/// Looks a type up by name.
	pub fn get(&self, name: &str) -> Option<TypeDesc> {
		self.types.read().get(name).cloned()
	}

	/// Number of types, including the root.
	pub fn type_count(&self) -> usize {
		self.types.read().len()
	}
}

impl Default for TypeUniverse {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for TypeUniverse {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypeUniverse")
			.field("id", &self.id)
			.field("types", &self.type_count())
			.finish()
	}
}
