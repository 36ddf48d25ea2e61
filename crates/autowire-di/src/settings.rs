//! Container settings
//!
//! Settings can be written in TOML:
//!
//! ```toml
//! depth_budget = 64
//! detect_cycles = true
//!
//! [variables]
//! name = "Alice"
//! workers = 4
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Depth budget used when none is configured.
pub const DEFAULT_DEPTH_BUDGET: usize = 64;

/// Largest depth budget a container accepts.
///
/// Every hop is a nested call on the resolving thread's stack.
pub const MAX_DEPTH_BUDGET: usize = 100;

#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("Failed to read settings from {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid settings: {0}")]
	Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
	/// Maximum number of hops a single resolution may take
	///
	/// Capped at [`MAX_DEPTH_BUDGET`] when the container is built, so a
	/// cycle with detection disabled still ends in a recursion error.
	pub depth_budget: usize,

	/// Fail on the first revisit of an in-flight identifier
	pub detect_cycles: bool,

	/// Scalar variables seeded into the binding store
	pub variables: BTreeMap<String, serde_json::Value>,
}

impl Default for ContainerSettings {
	fn default() -> Self {
		Self {
			depth_budget: DEFAULT_DEPTH_BUDGET,
			detect_cycles: true,
			variables: BTreeMap::new(),
		}
	}
}

impl ContainerSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use autowire_di::ContainerSettings;
	///
	/// let settings = ContainerSettings::from_toml_str("depth_budget = 8").unwrap();
	/// assert_eq!(settings.depth_budget, 8);
	/// assert!(settings.detect_cycles);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	pub fn with_depth_budget(mut self, depth_budget: usize) -> Self {
		self.depth_budget = depth_budget;
		self
	}

	pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
		self.detect_cycles = enabled;
		self
	}

	pub fn with_variable(
		mut self,
		name: impl Into<String>,
		value: impl Into<serde_json::Value>,
	) -> Self {
		self.variables.insert(name.into(), value.into());
		self
	}
}
