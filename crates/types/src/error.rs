/// Errors raised while defining a type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
	/// A type with this name already exists in the universe.
	#[error("type {name:?} is already defined")]
	DuplicateName { name: String },

	/// A base was created by a different universe.
	#[error("base {base:?} of {name:?} belongs to another type universe")]
	ForeignBase { name: String, base: String },

	/// The same base appears more than once in the base list.
	#[error("duplicate base {base:?} in definition of {name:?}")]
	DuplicateBase { name: String, base: String },

	/// No consistent C3 linearization exists for the requested bases.
	#[error("cannot create a consistent method resolution order for {name:?} (bases: {bases})")]
	InconsistentMro { name: String, bases: String },
}
