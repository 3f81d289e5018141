// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The process-wide lookup store.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use ozw_config::LocalizationConfig;
use tracing::{debug, warn};

use crate::document::{DocumentParser, Element, XmlDocumentParser};
use crate::entry::{LabelEntry, ValueEntry};
use crate::key::value_key;
use crate::loader::{self, LoadReport, Tables};
use crate::model::{CommandClass, Value, ValueType};

static INSTANCE: OnceCell<Localization> = OnceCell::new();

/// Result of [`Localization::apply_to_value`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
	/// Whether the whole-value entry was found and applied.
	pub value_found: bool,
	/// Bit positions that received text.
	pub bits_applied: usize,
	/// Bit positions with no entry.
	pub bits_missing: usize,
}

/// Localized labels and help text for command classes and values.
///
/// Tables are built once and read-only afterwards.
#[derive(Debug, Default)]
pub struct Localization {
	classes: HashMap<u8, LabelEntry>,
	values: HashMap<u64, ValueEntry>,
	language: Option<String>,
	report: LoadReport,
}

impl Localization {
	/// The process-wide store.
	///
	/// The first call loads configuration (see [`ozw_config::load_config`])
	/// and reads `ValueHelp.xml`; later calls return the same store. Concurrent
	/// first calls block until the single load has finished.
	pub fn instance() -> &'static Localization {
		INSTANCE.get_or_init(|| {
			let config = ozw_config::load_config().unwrap_or_else(|e| {
				warn!(error = %e, "failed to load localization configuration, using defaults");
				LocalizationConfig::default()
			});
			Self::load(&config)
		})
	}

	/// Initialise the process-wide store from an explicit configuration.
	///
	/// If the store already exists, `config` is ignored.
	pub fn init(config: &LocalizationConfig) -> &'static Localization {
		let mut loaded = false;
		let store = INSTANCE.get_or_init(|| {
			loaded = true;
			Self::load(config)
		});
		if !loaded {
			debug!("localization store already initialised, ignoring configuration");
		}
		store
	}

	pub fn is_initialized() -> bool {
		INSTANCE.get().is_some()
	}

	/// A store with no entries; every lookup misses.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Load `ValueHelp.xml` from the configured directory.
	pub fn load(config: &LocalizationConfig) -> Self {
		Self::load_with(&XmlDocumentParser, config)
	}

	pub fn load_with(parser: &dyn DocumentParser, config: &LocalizationConfig) -> Self {
		let (tables, report) = loader::load_resource(parser, &config.config_path);
		Self::from_tables(tables, report, config.language.clone())
	}

	/// Build a store from an already parsed document.
	pub fn from_document(root: &Element, language: Option<String>) -> Self {
		let (tables, report) = loader::load_document(root);
		Self::from_tables(tables, report, language)
	}

	fn from_tables(tables: Tables, report: LoadReport, language: Option<String>) -> Self {
		Self {
			classes: tables.classes,
			values: tables.values,
			language,
			report,
		}
	}

	/// Preferred language, when configured.
	pub fn language(&self) -> Option<&str> {
		self.language.as_deref()
	}

	pub fn report(&self) -> &LoadReport {
		&self.report
	}

	pub fn command_class_count(&self) -> usize {
		self.classes.len()
	}

	pub fn value_count(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty() && self.values.is_empty()
	}

	pub fn class_entry(&self, command_class: u8) -> Option<&LabelEntry> {
		self.classes.get(&command_class)
	}

	pub fn value_entry(&self, command_class: u8, index: u16, pos: Option<u32>) -> Option<&ValueEntry> {
		self.values.get(&value_key(command_class, index, pos))
	}

	/// Label for a command class in the preferred language.
	pub fn command_class_label(&self, command_class: u8) -> Option<&str> {
		self
			.class_entry(command_class)
			.map(|entry| entry.label_for(self.language()))
	}

	pub fn value_label(&self, command_class: u8, index: u16, pos: Option<u32>) -> Option<&str> {
		self
			.value_entry(command_class, index, pos)
			.map(|entry| entry.label_for(self.language()))
	}

	pub fn value_help(&self, command_class: u8, index: u16, pos: Option<u32>) -> Option<&str> {
		self
			.value_entry(command_class, index, pos)
			.map(|entry| entry.help_for(self.language()))
	}

	/// Command class entries ordered by class id.
	pub fn command_classes(&self) -> impl Iterator<Item = &LabelEntry> {
		let mut entries: Vec<&LabelEntry> = self.classes.values().collect();
		entries.sort_by_key(|entry| entry.command_class());
		entries.into_iter()
	}

	/// Value entries ordered by key.
	pub fn values(&self) -> impl Iterator<Item = &ValueEntry> {
		let mut entries: Vec<&ValueEntry> = self.values.values().collect();
		entries.sort_by_key(|entry| entry.key());
		entries.into_iter()
	}

	/// Set label and help text on `value`, and on each bit of a bit-set value.
	///
	/// Misses are logged and leave the value untouched.
	pub fn apply_to_value(&self, value: &mut dyn Value) -> ApplyOutcome {
		let id = value.value_id();
		let lang = self.language();
		let mut outcome = ApplyOutcome::default();

		match self.value_entry(id.command_class_id, id.index, None) {
			Some(entry) => {
				value.set_help(entry.help_for(lang));
				value.set_label(entry.label_for(lang));
				outcome.value_found = true;
			}
			None => {
				warn!(
					command_class = id.command_class_id,
					index = id.index,
					"Localization Warning: No Entry for ValueID"
				);
			}
		}

		if id.value_type != ValueType::BitSet {
			return outcome;
		}

		let Some(bits) = value.as_bit_set_mut() else {
			debug!(
				command_class = id.command_class_id,
				index = id.index,
				"bit-set value exposes no bit access, skipping bit labels"
			);
			return outcome;
		};

		for pos in 0..bits.size() {
			match self.value_entry(id.command_class_id, id.index, Some(u32::from(pos))) {
				Some(entry) => {
					bits.set_bit_help(pos, entry.help_for(lang));
					bits.set_bit_label(pos, entry.label_for(lang));
					outcome.bits_applied += 1;
				}
				None => {
					warn!(
						command_class = id.command_class_id,
						index = id.index,
						pos,
						"Localization Warning: No Entry for ValueID bit"
					);
					outcome.bits_missing += 1;
				}
			}
		}

		outcome
	}

	/// Set the display label of `cc`, falling back to its built-in name.
	///
	/// Returns whether a localized label was found.
	pub fn apply_to_command_class(&self, cc: &mut dyn CommandClass) -> bool {
		let cc_id = cc.command_class_id();
		match self.command_class_label(cc_id) {
			Some(label) => {
				cc.set_command_class_label(label);
				true
			}
			None => {
				warn!(
					command_class = cc_id,
					"Localization Warning: No Entry for CommandClass"
				);
				let name = cc.command_class_name().to_string();
				cc.set_command_class_label(&name);
				false
			}
		}
	}
}
