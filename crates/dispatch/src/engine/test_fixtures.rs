use helio_types::{TypeDesc, TypeUniverse, Typed};

use crate::MultiMethod;
use crate::extract::positional;

/// Small hierarchy shared by the engine tests:
///
/// ```text
/// object
/// ├── Number ── Int ── Bool
/// │         └── Float
/// ├── Animal ── Dog ── Puppy
/// │         └── Cat
/// └── Str
/// ```
pub(crate) struct Zoo {
	pub universe: TypeUniverse,
	pub number: TypeDesc,
	pub int: TypeDesc,
	pub bool: TypeDesc,
	pub float: TypeDesc,
	pub animal: TypeDesc,
	pub dog: TypeDesc,
	pub puppy: TypeDesc,
	pub cat: TypeDesc,
	pub str: TypeDesc,
}

impl Zoo {
	pub fn new() -> Self {
		let universe = TypeUniverse::new();
		let number = universe.define("Number", &[]).unwrap();
		let int = universe.define("Int", &[number.clone()]).unwrap();
		let bool = universe.define("Bool", &[int.clone()]).unwrap();
		let float = universe.define("Float", &[number.clone()]).unwrap();
		let animal = universe.define("Animal", &[]).unwrap();
		let dog = universe.define("Dog", &[animal.clone()]).unwrap();
		let puppy = universe.define("Puppy", &[dog.clone()]).unwrap();
		let cat = universe.define("Cat", &[animal.clone()]).unwrap();
		let str = universe.define("Str", &[]).unwrap();
		Self {
			universe,
			number,
			int,
			bool,
			float,
			animal,
			dog,
			puppy,
			cat,
			str,
		}
	}

	pub fn obj(&self, ty: &TypeDesc, tag: &'static str) -> Obj {
		Obj {
			ty: ty.clone(),
			tag,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Obj {
	pub ty: TypeDesc,
	pub tag: &'static str,
}

impl Typed for Obj {
	fn runtime_type(&self) -> TypeDesc {
		self.ty.clone()
	}
}

pub(crate) type Engine = MultiMethod<Obj, String>;

/// Engine dispatching on every positional argument.
pub(crate) fn engine() -> Engine {
	MultiMethod::new(positional)
}

/// Implementation that returns `name` regardless of the call.
pub(crate) fn named(
	name: &'static str,
) -> impl Fn(&Engine, &crate::Call<Obj>) -> String + Send + Sync + 'static {
	move |_, _| name.to_string()
}
