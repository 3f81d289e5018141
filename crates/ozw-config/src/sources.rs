// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment, overrides.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ConfigLayer;

/// Environment variable naming the resource directory.
pub const ENV_CONFIG_PATH: &str = "OZW_CONFIG_PATH";
/// Environment variable naming the preferred language.
pub const ENV_LANGUAGE: &str = "OZW_LANGUAGE";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	Overrides = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Defaults are applied during finalization
		Ok(ConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// System options file: /etc/ozw/options.toml
	pub fn system() -> Self {
		Self::new("/etc/ozw/options.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: OZW_<FIELD>
pub struct EnvSource;

impl EnvSource {
	fn load_with<F>(lookup: F) -> Result<ConfigLayer, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

		let language = match var(ENV_LANGUAGE) {
			Some(lang) if lang.chars().any(char::is_whitespace) => {
				return Err(ConfigError::invalid_value(
					ENV_LANGUAGE,
					format!("language tag '{lang}' must not contain whitespace"),
				));
			}
			other => other,
		};

		Ok(ConfigLayer {
			config_path: var(ENV_CONFIG_PATH).map(PathBuf::from),
			language,
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Self::load_with(|name| std::env::var(name).ok())
	}
}

/// Explicit overrides supplied by the embedding application or the CLI.
#[derive(Debug, Clone, Default)]
pub struct OverrideSource {
	layer: ConfigLayer,
}

impl OverrideSource {
	pub fn new(layer: ConfigLayer) -> Self {
		Self { layer }
	}
}

impl ConfigSource for OverrideSource {
	fn name(&self) -> &'static str {
		"overrides"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Overrides
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(self.layer.clone())
	}
}
