use serde::Deserialize;

use crate::OverridePolicy;

/// Engine settings.
///
/// ```toml
/// label = "lightcurve.create"
/// default_policy = "warn"
/// clear_cache_on_register = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Name attached to every log event of the engine.
	pub label: String,
	/// Policy used by [`crate::MultiMethod::define`] when none is given.
	pub default_policy: OverridePolicy,
	/// Makes [`crate::MultiMethod::register`] clear the resolution cache like
	/// [`crate::MultiMethod::define`] does.
	pub clear_cache_on_register: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			label: "multimethod".to_string(),
			default_policy: OverridePolicy::Silent,
			clear_cache_on_register: false,
		}
	}
}

impl EngineConfig {
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn with_default_policy(mut self, policy: OverridePolicy) -> Self {
		self.default_policy = policy;
		self
	}

	pub fn with_clear_cache_on_register(mut self, clear: bool) -> Self {
		self.clear_cache_on_register = clear;
		self
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid engine config: {0}")]
	Toml(#[from] toml::de::Error),
}
