use std::fmt;

use helio_types::TypeDesc;

use crate::{OverridePolicy, Signature};

/// Result of a successful registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertAction {
	/// Appended; no overlap was detected (or none was looked for).
	Inserted,
	/// Appended under [`OverridePolicy::Warn`] despite overlapping an existing signature.
	Shadowed(ShadowingWarning),
}

impl InsertAction {
	pub fn warning(&self) -> Option<&ShadowingWarning> {
		match self {
			Self::Inserted => None,
			Self::Shadowed(w) => Some(w),
		}
	}
}

/// Non-fatal report that a new definition will intercept calls an older one used to get.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowingWarning {
	pub incoming: Signature,
	/// The most recently registered signature the incoming one overlaps.
	pub existing: Signature,
}

impl fmt::Display for ShadowingWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"definition ({}) overrides prior definition ({})",
			self.incoming, self.existing
		)
	}
}

/// Registration refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
	/// [`OverridePolicy::Fail`] and an overlapping signature exists.
	#[error("definition ({incoming}) conflicts with prior definition ({existing})")]
	Conflict {
		incoming: Signature,
		existing: Signature,
	},

	/// An unrecognized policy value met an actual overlap.
	#[error("invalid override policy {policy} for definition ({incoming}) overlapping ({existing})")]
	InvalidPolicy {
		policy: OverridePolicy,
		incoming: Signature,
		existing: Signature,
	},

	#[error("cannot register an empty signature")]
	EmptySignature,
}

/// Invocation failed before any implementation ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
	#[error("no definition matches ({types})")]
	NoMatch { types: Signature },

	/// A delegation marker named the root type.
	#[error("cannot delegate past {context}: it has no supertype")]
	NoSupertype { context: TypeDesc },

	/// A delegation marker wraps a value that is not an instance of its context.
	#[error("delegation marker for {context} wraps a {value_type}, which is not a subtype")]
	ContextMismatch {
		value_type: TypeDesc,
		context: TypeDesc,
	},
}
