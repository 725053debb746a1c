//! C3 linearization.

use crate::TypeDesc;

/// Why a linearization could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MroError {
	DuplicateBase(TypeDesc),
	Inconsistent,
}

/// Computes the ancestors of a new type with the given bases, in resolution order.
///
/// The result excludes the new type itself: `merge(L(b1), .., L(bn), [b1, .., bn])`.
pub(crate) fn linearize(bases: &[TypeDesc]) -> Result<Vec<TypeDesc>, MroError> {
	for (i, base) in bases.iter().enumerate() {
		if bases[..i].contains(base) {
			return Err(MroError::DuplicateBase(base.clone()));
		}
	}

	let lists: Vec<Vec<TypeDesc>> = bases
		.iter()
		.map(|b| b.mro().cloned().collect())
		.chain(std::iter::once(bases.to_vec()))
		.collect();
	let mut seqs: Vec<&[TypeDesc]> = lists.iter().map(Vec::as_slice).collect();
	let mut out = Vec::new();

	loop {
		seqs.retain(|s| !s.is_empty());
		if seqs.is_empty() {
			return Ok(out);
		}

		let head = seqs
			.iter()
			.map(|s| &s[0])
			.find(|candidate| !seqs.iter().any(|s| s[1..].contains(*candidate)))
			.cloned()
			.ok_or(MroError::Inconsistent)?;

		for s in seqs.iter_mut() {
			let rest = *s;
			if rest[0] == head {
				*s = &rest[1..];
			}
		}
		out.push(head);
	}
}
