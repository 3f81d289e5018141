// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the OpenZWave localization store.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file,
//!   environment, explicit overrides)
//! - Consistent environment variable naming (`OZW_*`)
//!
//! # Usage
//!
//! ```ignore
//! use ozw_config::load_config;
//!
//! let config = load_config()?;
//! println!("resources in {}", config.config_path.display());
//! ```

pub mod error;
pub mod layer;
pub mod sources;

pub use error::ConfigError;
pub use layer::{ConfigLayer, DEFAULT_CONFIG_PATH};
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, OverrideSource, Precedence, TomlSource,
	ENV_CONFIG_PATH, ENV_LANGUAGE,
};

use std::path::PathBuf;

use tracing::debug;

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationConfig {
	/// Directory holding `ValueHelp.xml`.
	pub config_path: PathBuf,
	/// Preferred language tag; `None` selects the default text.
	pub language: Option<String>,
}

impl Default for LocalizationConfig {
	fn default() -> Self {
		ConfigLayer::default().finalize()
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`OZW_*`)
/// 2. Config file (`/etc/ozw/options.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<LocalizationConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_file: impl Into<PathBuf>,
) -> Result<LocalizationConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_file)),
		Box::new(EnvSource),
	])
}

/// Load configuration with explicit overrides applied above every other source.
pub fn load_config_with_overrides(
	config_file: Option<PathBuf>,
	overrides: ConfigLayer,
) -> Result<LocalizationConfig, ConfigError> {
	let file = config_file
		.map(TomlSource::new)
		.unwrap_or_else(TomlSource::system);

	load_from_sources(vec![
		Box::new(OverrideSource::new(overrides)),
		Box::new(DefaultsSource),
		Box::new(file),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<LocalizationConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let config = merged.finalize();
	debug!(
		config_path = %config.config_path.display(),
		language = config.language.as_deref().unwrap_or("<default>"),
		"localization configuration loaded"
	);
	Ok(config)
}
