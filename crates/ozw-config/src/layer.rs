// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::LocalizationConfig;

/// Default resource directory, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigLayer {
	/// Directory holding the device database and `ValueHelp.xml`.
	#[serde(default)]
	pub config_path: Option<PathBuf>,
	/// Preferred language tag for labels and help text.
	#[serde(default)]
	pub language: Option<String>,
}

impl ConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.config_path.is_some() {
			self.config_path = other.config_path;
		}
		if other.language.is_some() {
			self.language = other.language;
		}
	}

	pub fn finalize(self) -> LocalizationConfig {
		LocalizationConfig {
			config_path: self
				.config_path
				.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
			language: self.language.filter(|l| !l.trim().is_empty()),
		}
	}
}
