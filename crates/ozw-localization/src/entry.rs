// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Localized text entries for command classes and values.

use std::collections::HashMap;

use serde::Serialize;

use crate::key::{class_key, value_key, WHOLE_VALUE};

/// Default text plus per-language variants.
///
/// Each slot is written at most once; later writes to a filled slot are
/// rejected so the first text in the resource file wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
	default: Option<String>,
	languages: HashMap<String, String>,
}

impl LocalizedText {
	/// Store `text` in the slot for `lang` (`None` or `""` is the default slot).
	///
	/// Returns `false` if the slot was already filled; the stored text is kept.
	pub fn insert(&mut self, text: &str, lang: Option<&str>) -> bool {
		match lang.filter(|l| !l.is_empty()) {
			None => {
				if self.default.is_some() {
					return false;
				}
				self.default = Some(text.to_string());
				true
			}
			Some(lang) => {
				if self.languages.contains_key(lang) {
					return false;
				}
				self.languages.insert(lang.to_string(), text.to_string());
				true
			}
		}
	}

	pub fn default_text(&self) -> &str {
		self.default.as_deref().unwrap_or_default()
	}

	pub fn has_default(&self) -> bool {
		self.default.is_some()
	}

	/// Exact language match only.
	pub fn get(&self, lang: &str) -> Option<&str> {
		self.languages.get(lang).map(String::as_str)
	}

	/// Exact language match, else the default text.
	pub fn resolve(&self, lang: Option<&str>) -> &str {
		lang.and_then(|l| self.get(l)).unwrap_or_else(|| self.default_text())
	}

	/// Language tags with a variant, sorted.
	pub fn languages(&self) -> Vec<&str> {
		let mut langs: Vec<&str> = self.languages.keys().map(String::as_str).collect();
		langs.sort_unstable();
		langs
	}

	pub fn is_empty(&self) -> bool {
		self.default.is_none() && self.languages.is_empty()
	}
}

/// The localized name of one command class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
	command_class: u8,
	label: LocalizedText,
}

impl LabelEntry {
	pub fn new(command_class: u8) -> Self {
		Self {
			command_class,
			label: LocalizedText::default(),
		}
	}

	pub fn command_class(&self) -> u8 {
		self.command_class
	}

	pub fn key(&self) -> u64 {
		class_key(u16::from(self.command_class), None)
	}

	pub fn add_label(&mut self, label: &str, lang: Option<&str>) -> bool {
		self.label.insert(label, lang)
	}

	/// The default (language-less) label.
	pub fn label(&self) -> &str {
		self.label.default_text()
	}

	pub fn label_for(&self, lang: Option<&str>) -> &str {
		self.label.resolve(lang)
	}

	pub fn labels(&self) -> &LocalizedText {
		&self.label
	}
}

/// The localized label and help text of one value, or one bit of a bit-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueEntry {
	command_class: u8,
	index: u16,
	position: u32,
	label: LocalizedText,
	help: LocalizedText,
}

impl ValueEntry {
	pub fn new(command_class: u8, index: u16, position: Option<u32>) -> Self {
		Self {
			command_class,
			index,
			position: position.unwrap_or(WHOLE_VALUE),
			label: LocalizedText::default(),
			help: LocalizedText::default(),
		}
	}

	pub fn command_class(&self) -> u8 {
		self.command_class
	}

	pub fn index(&self) -> u16 {
		self.index
	}

	/// Bit position, `None` when the entry covers the whole value.
	pub fn position(&self) -> Option<u32> {
		(self.position != WHOLE_VALUE).then_some(self.position)
	}

	pub fn key(&self) -> u64 {
		value_key(self.command_class, self.index, self.position())
	}

	pub fn add_label(&mut self, label: &str, lang: Option<&str>) -> bool {
		self.label.insert(label, lang)
	}

	pub fn add_help(&mut self, help: &str, lang: Option<&str>) -> bool {
		self.help.insert(help, lang)
	}

	pub fn label(&self) -> &str {
		self.label.default_text()
	}

	pub fn help(&self) -> &str {
		self.help.default_text()
	}

	pub fn label_for(&self, lang: Option<&str>) -> &str {
		self.label.resolve(lang)
	}

	pub fn help_for(&self, lang: Option<&str>) -> &str {
		self.help.resolve(lang)
	}

	pub fn labels(&self) -> &LocalizedText {
		&self.label
	}

	pub fn helps(&self) -> &LocalizedText {
		&self.help
	}
}
