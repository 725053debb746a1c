use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// How registration reacts to a signature that overlaps an existing one.
///
/// The raw encoding (`0`, `1`, `2`) is kept so that configuration can carry values outside
/// the known set; those surface as [`crate::RegisterError::InvalidPolicy`] once a conflict
/// is actually detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverridePolicy {
	/// Append without checking for overlap.
	#[default]
	Silent,
	/// Check; on overlap, append anyway and report a shadowing warning.
	Warn,
	/// Check; on overlap, refuse the registration.
	Fail,
	/// Any other raw value. Non-zero values check for overlap and refuse on conflict.
	Unrecognized(u8),
}

impl OverridePolicy {
	/// Whether registration scans existing signatures under this policy.
	#[inline]
	pub const fn checks_conflicts(self) -> bool {
		!matches!(self, Self::Silent | Self::Unrecognized(0))
	}

	pub const fn as_raw(self) -> u8 {
		match self {
			Self::Silent => 0,
			Self::Warn => 1,
			Self::Fail => 2,
			Self::Unrecognized(n) => n,
		}
	}
}

impl From<u8> for OverridePolicy {
	fn from(raw: u8) -> Self {
		match raw {
			0 => Self::Silent,
			1 => Self::Warn,
			2 => Self::Fail,
			n => Self::Unrecognized(n),
		}
	}
}

impl fmt::Display for OverridePolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Silent => write!(f, "silent"),
			Self::Warn => write!(f, "warn"),
			Self::Fail => write!(f, "fail"),
			Self::Unrecognized(n) => write!(f, "unrecognized({n})"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown override policy {0:?} (expected silent, warn, fail or an integer)")]
pub struct ParsePolicyError(pub String);

impl FromStr for OverridePolicy {
	type Err = ParsePolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"silent" => Ok(Self::Silent),
			"warn" => Ok(Self::Warn),
			"fail" => Ok(Self::Fail),
			other => other
				.parse::<u8>()
				.map(Self::from)
				.map_err(|_| ParsePolicyError(s.to_string())),
		}
	}
}

impl<'de> Deserialize<'de> for OverridePolicy {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Repr {
			Raw(u8),
			Name(String),
		}

		match Repr::deserialize(deserializer)? {
			Repr::Raw(n) => Ok(n.into()),
			Repr::Name(s) => s.parse().map_err(serde::de::Error::custom),
		}
	}
}
