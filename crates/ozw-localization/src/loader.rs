// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reads `ValueHelp.xml` into the lookup tables.
//!
//! Expected layout:
//!
//! ```text
//! <Localization>
//!   <CommandClass id="<hex>">
//!     <Label lang="<tag>?">text</Label>
//!     <Value index="<hex>" pos="<hex>?">
//!       <Label lang="<tag>?">text</Label>
//!       <Help lang="<tag>?">text</Help>
//!     </Value>
//!   </CommandClass>
//! </Localization>
//! ```
//!
//! Problems with individual nodes are logged and only the smallest enclosing
//! node is skipped. A missing or unreadable file leaves both tables empty.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::document::{DocumentParser, Element};
use crate::entry::{LabelEntry, ValueEntry};
use crate::key::{value_key, WHOLE_VALUE};

/// File name of the resource inside the configured directory.
pub const RESOURCE_FILE_NAME: &str = "ValueHelp.xml";

const LOCALIZATION: &str = "Localization";
const COMMAND_CLASS: &str = "CommandClass";
const LABEL: &str = "Label";
const VALUE: &str = "Value";
const HELP: &str = "Help";

/// Summary of one load pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
	/// Resolved resource file, if loading went through the filesystem.
	pub path: Option<PathBuf>,
	/// Whether a document was parsed at all.
	pub document_loaded: bool,
	pub command_classes: usize,
	pub values: usize,
	/// Warnings logged while walking the document.
	pub warnings: usize,
	/// Nodes dropped because of missing or malformed attributes.
	pub skipped_nodes: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
	pub(crate) classes: HashMap<u8, LabelEntry>,
	pub(crate) values: HashMap<u64, ValueEntry>,
}

/// `<resource_dir>/ValueHelp.xml`
pub fn resource_path(resource_dir: &Path) -> PathBuf {
	resource_dir.join(RESOURCE_FILE_NAME)
}

pub(crate) fn load_resource(
	parser: &dyn DocumentParser,
	resource_dir: &Path,
) -> (Tables, LoadReport) {
	let path = resource_path(resource_dir);

	let root = match parser.parse_file(&path) {
		Ok(root) => root,
		Err(e) => {
			info!(path = %path.display(), error = %e, "Unable to load ValueHelp file");
			let report = LoadReport {
				path: Some(path),
				..Default::default()
			};
			return (Tables::default(), report);
		}
	};

	let (tables, mut report) = load_document(&root);
	report.path = Some(path);
	(tables, report)
}

pub(crate) fn load_document(root: &Element) -> (Tables, LoadReport) {
	let mut loader = Loader::default();
	loader.read_document(root);

	let Loader { tables, mut report } = loader;
	report.document_loaded = true;
	report.command_classes = tables.classes.len();
	report.values = tables.values.len();

	debug!(
		command_classes = report.command_classes,
		values = report.values,
		warnings = report.warnings,
		skipped = report.skipped_nodes,
		"localization document loaded"
	);
	(tables, report)
}

#[derive(Default)]
struct Loader {
	tables: Tables,
	report: LoadReport,
}

impl Loader {
	fn read_document(&mut self, root: &Element) {
		// The root is normally <Localization>; a wrapper root holding
		// <Localization> children is accepted too.
		if root.name() == LOCALIZATION {
			self.read_localization(root);
		} else {
			for localization in root.children_named(LOCALIZATION) {
				self.read_localization(localization);
			}
		}
	}

	fn read_localization(&mut self, localization: &Element) {
		for cc in localization.children_named(COMMAND_CLASS) {
			self.read_command_class(cc);
		}
	}

	fn read_command_class(&mut self, element: &Element) {
		let cc_id = match hex_attribute::<u8>(element, "id") {
			HexAttribute::Present(id) => id,
			HexAttribute::Missing => {
				warn!(
					line = element.line(),
					"Error in ValueHelp.xml - missing CommandClass id attribute"
				);
				self.skip();
				return;
			}
			HexAttribute::Malformed(raw) => {
				warn!(
					line = element.line(),
					id = %raw,
					"Error in ValueHelp.xml - invalid CommandClass id attribute"
				);
				self.skip();
				return;
			}
		};

		for child in element.children() {
			match child.name() {
				LABEL => self.read_class_label(cc_id, child),
				VALUE => self.read_value(cc_id, child),
				_ => {}
			}
		}
	}

	fn read_class_label(&mut self, cc_id: u8, element: &Element) {
		let lang = element.attribute("lang");
		let entry = self
			.tables
			.classes
			.entry(cc_id)
			.or_insert_with(|| LabelEntry::new(cc_id));

		if !entry.add_label(element.text(), lang) {
			warn!(
				line = element.line(),
				command_class = cc_id,
				lang = lang.unwrap_or_default(),
				"Error in ValueHelp.xml - duplicate Label for CommandClass, keeping first"
			);
			self.report.warnings += 1;
		}
	}

	fn read_value(&mut self, cc_id: u8, element: &Element) {
		let index = match hex_attribute::<u16>(element, "index") {
			HexAttribute::Present(index) => index,
			HexAttribute::Missing => {
				warn!(
					line = element.line(),
					command_class = cc_id,
					"Error in ValueHelp.xml - missing Value index attribute"
				);
				self.skip();
				return;
			}
			HexAttribute::Malformed(raw) => {
				warn!(
					line = element.line(),
					command_class = cc_id,
					index = %raw,
					"Error in ValueHelp.xml - invalid Value index attribute"
				);
				self.skip();
				return;
			}
		};

		let pos = match hex_attribute::<u32>(element, "pos") {
			HexAttribute::Present(pos) if pos != WHOLE_VALUE => Some(pos),
			HexAttribute::Missing => None,
			// WHOLE_VALUE is reserved for the whole-value key
			HexAttribute::Present(_) => {
				warn!(
					line = element.line(),
					command_class = cc_id,
					index,
					pos = WHOLE_VALUE,
					"Error in ValueHelp.xml - reserved Value pos attribute"
				);
				self.skip();
				return;
			}
			HexAttribute::Malformed(raw) => {
				warn!(
					line = element.line(),
					command_class = cc_id,
					index,
					pos = %raw,
					"Error in ValueHelp.xml - invalid Value pos attribute"
				);
				self.skip();
				return;
			}
		};

		for child in element.children() {
			match child.name() {
				LABEL => self.read_value_text(cc_id, index, pos, child, TextKind::Label),
				HELP => self.read_value_text(cc_id, index, pos, child, TextKind::Help),
				_ => {}
			}
		}
	}

	fn read_value_text(
		&mut self,
		cc_id: u8,
		index: u16,
		pos: Option<u32>,
		element: &Element,
		kind: TextKind,
	) {
		let lang = element.attribute("lang");
		let entry = self
			.tables
			.values
			.entry(value_key(cc_id, index, pos))
			.or_insert_with(|| ValueEntry::new(cc_id, index, pos));

		let stored = match kind {
			TextKind::Label => entry.add_label(element.text(), lang),
			TextKind::Help => entry.add_help(element.text(), lang),
		};

		if !stored {
			warn!(
				line = element.line(),
				command_class = cc_id,
				index,
				pos = ?pos,
				lang = lang.unwrap_or_default(),
				"Error in ValueHelp.xml - duplicate {} for ValueID, keeping first",
				kind.tag()
			);
			self.report.warnings += 1;
		}
	}

	fn skip(&mut self) {
		self.report.warnings += 1;
		self.report.skipped_nodes += 1;
	}
}

#[derive(Debug, Clone, Copy)]
enum TextKind {
	Label,
	Help,
}

impl TextKind {
	fn tag(self) -> &'static str {
		match self {
			TextKind::Label => LABEL,
			TextKind::Help => HELP,
		}
	}
}

enum HexAttribute<T> {
	Present(T),
	Missing,
	Malformed(String),
}

fn hex_attribute<T: TryFrom<u64>>(element: &Element, name: &str) -> HexAttribute<T> {
	let Some(raw) = element.attribute(name) else {
		return HexAttribute::Missing;
	};

	match parse_hex(raw).and_then(|v| T::try_from(v).ok()) {
		Some(value) => HexAttribute::Present(value),
		None => HexAttribute::Malformed(raw.to_string()),
	}
}

/// Parse a base-16 number the way `strtol(s, _, 16)` reads it: surrounding
/// whitespace and an optional `0x` prefix are accepted and parsing stops at
/// the first non-hex character. Returns `None` when no digit is found or the
/// number does not fit in a `u64`.
pub fn parse_hex(raw: &str) -> Option<u64> {
	let s = raw.trim();
	let s = s.strip_prefix('+').unwrap_or(s);

	let digits = |s: &str| -> Option<u64> {
		let end = s
			.find(|c: char| !c.is_ascii_hexdigit())
			.unwrap_or(s.len());
		if end == 0 {
			return None;
		}
		u64::from_str_radix(&s[..end], 16).ok()
	};

	match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
		// "0x" followed by a non-digit reads as the leading zero
		Some(rest) => digits(rest).or_else(|| digits(s)),
		None => digits(s),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::XmlDocumentParser;
	use crate::key::value_key;
	use proptest::prelude::*;

	fn load(xml: &str) -> (Tables, LoadReport) {
		let root = XmlDocumentParser.parse_str(xml).unwrap();
		load_document(&root)
	}

	#[test]
	fn test_parse_hex() {
		assert_eq!(parse_hex("0x25"), Some(0x25));
		assert_eq!(parse_hex("0X25"), Some(0x25));
		assert_eq!(parse_hex("25"), Some(0x25));
		assert_eq!(parse_hex("ff"), Some(0xff));
		assert_eq!(parse_hex("  0x10  "), Some(0x10));
		assert_eq!(parse_hex("1fz"), Some(0x1f));
		assert_eq!(parse_hex("0x"), Some(0));
		assert_eq!(parse_hex(""), None);
		assert_eq!(parse_hex("zz"), None);
		assert_eq!(parse_hex("0x1_0000_0000_0000_0000"), Some(1));
		assert_eq!(parse_hex("10000000000000000"), None);
	}

	#[test]
	fn test_class_labels_accumulate_languages() {
		let (tables, report) = load(
			r#"<Localization>
				<CommandClass id="0x25">
					<Label>Switch</Label>
					<Label lang="fr">Interrupteur</Label>
				</CommandClass>
			</Localization>"#,
		);

		let entry = &tables.classes[&0x25];
		assert_eq!(entry.label(), "Switch");
		assert_eq!(entry.labels().get("fr"), Some("Interrupteur"));
		assert_eq!(report.command_classes, 1);
		assert_eq!(report.warnings, 0);
	}

	#[test]
	fn test_value_label_and_help_share_entry() {
		let (tables, report) = load(
			r#"<Localization>
				<CommandClass id="70">
					<Value index="0x01">
						<Label>Wake up interval</Label>
						<Help>Seconds between wake ups</Help>
						<Help lang="de">Sekunden zwischen Aufwachvorgaengen</Help>
					</Value>
				</CommandClass>
			</Localization>"#,
		);

		let entry = &tables.values[&value_key(0x70, 1, None)];
		assert_eq!(entry.label(), "Wake up interval");
		assert_eq!(entry.help(), "Seconds between wake ups");
		assert_eq!(
			entry.helps().get("de"),
			Some("Sekunden zwischen Aufwachvorgaengen")
		);
		assert_eq!(report.values, 1);
	}

	#[test]
	fn test_pos_creates_bit_entry() {
		let (tables, _) = load(
			r#"<Localization>
				<CommandClass id="0x71">
					<Value index="0x10" pos="0x2"><Label>Bit two</Label></Value>
				</CommandClass>
			</Localization>"#,
		);

		assert!(tables.values.contains_key(&value_key(0x71, 0x10, Some(2))));
		assert!(!tables.values.contains_key(&value_key(0x71, 0x10, None)));
	}

	#[test]
	fn test_missing_class_id_skips_only_that_class() {
		let (tables, report) = load(
			r#"<Localization>
				<CommandClass><Label>Orphan</Label></CommandClass>
				<CommandClass id="0x20"><Label>Basic</Label></CommandClass>
			</Localization>"#,
		);

		assert_eq!(tables.classes.len(), 1);
		assert_eq!(tables.classes[&0x20].label(), "Basic");
		assert_eq!(report.skipped_nodes, 1);
		assert_eq!(report.warnings, 1);
	}

	#[test]
	fn test_out_of_range_class_id_is_skipped() {
		let (tables, report) = load(
			r#"<Localization><CommandClass id="0x125"><Label>Big</Label></CommandClass></Localization>"#,
		);
		assert!(tables.classes.is_empty());
		assert_eq!(report.skipped_nodes, 1);
	}

	#[test]
	fn test_missing_value_index_skips_whole_value() {
		let (tables, report) = load(
			r#"<Localization>
				<CommandClass id="0x70">
					<Value><Label>Lost</Label><Help>Lost help</Help></Value>
					<Value index="2"><Label>Kept</Label></Value>
				</CommandClass>
			</Localization>"#,
		);

		assert_eq!(tables.values.len(), 1);
		assert_eq!(tables.values[&value_key(0x70, 2, None)].label(), "Kept");
		assert_eq!(report.skipped_nodes, 1);
	}

	#[test]
	fn test_invalid_pos_skips_value() {
		let (tables, report) = load(
			r#"<Localization>
				<CommandClass id="0x71">
					<Value index="1" pos="zz"><Label>Bad</Label></Value>
				</CommandClass>
			</Localization>"#,
		);
		assert!(tables.values.is_empty());
		assert_eq!(report.skipped_nodes, 1);
	}

	#[test]
	fn test_reserved_pos_does_not_merge_into_whole_value() {
		let (tables, report) = load(
			r#"<Localization>
				<CommandClass id="0x71">
					<Value index="1"><Label>Whole</Label></Value>
					<Value index="1" pos="ffffffff"><Label>Bit</Label><Help>bit help</Help></Value>
				</CommandClass>
			</Localization>"#,
		);
		assert_eq!(tables.values.len(), 1);
		let whole = &tables.values[&value_key(0x71, 1, None)];
		assert_eq!(whole.label(), "Whole");
		assert_eq!(whole.help(), "");
		assert!(whole.helps().is_empty());
		assert_eq!(report.skipped_nodes, 1);
		assert_eq!(report.warnings, 1);
	}

	#[test]
	fn test_duplicate_text_keeps_first_and_warns() {
		let (tables, report) = load(
			r#"<Localization>
				<CommandClass id="0x25">
					<Label>Switch</Label>
					<Label>Binary Switch</Label>
					<Value index="0"><Label>Level</Label></Value>
					<Value index="0"><Label>Other</Label><Help>Extra</Help></Value>
				</CommandClass>
			</Localization>"#,
		);

		assert_eq!(tables.classes[&0x25].label(), "Switch");
		let value = &tables.values[&value_key(0x25, 0, None)];
		assert_eq!(value.label(), "Level");
		assert_eq!(value.help(), "Extra");
		assert_eq!(report.warnings, 2);
		assert_eq!(report.skipped_nodes, 0);
	}

	#[test]
	fn test_dispatch_uses_child_tag() {
		let (tables, _) = load(
			r#"<Localization>
				<CommandClass id="0x25">
					<Help>not a class child</Help>
					<Value index="0"><Label>Level</Label></Value>
				</CommandClass>
			</Localization>"#,
		);

		assert!(!tables.classes.contains_key(&0x25));
		assert_eq!(tables.values.len(), 1);
	}

	#[test]
	fn test_wrapper_root_is_accepted() {
		let (tables, _) = load(
			r#"<Config>
				<Localization><CommandClass id="0x20"><Label>Basic</Label></CommandClass></Localization>
				<Other><CommandClass id="0x21"><Label>Ignored</Label></CommandClass></Other>
			</Config>"#,
		);
		assert_eq!(tables.classes.len(), 1);
		assert!(tables.classes.contains_key(&0x20));
	}

	#[test]
	fn test_missing_file_leaves_tables_empty() {
		let dir = tempfile::tempdir().unwrap();
		let (tables, report) = load_resource(&XmlDocumentParser, dir.path());

		assert!(tables.classes.is_empty());
		assert!(tables.values.is_empty());
		assert!(!report.document_loaded);
		assert_eq!(report.path, Some(dir.path().join(RESOURCE_FILE_NAME)));
	}

	#[test]
	fn test_file_is_read_from_directory() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(
			dir.path().join(RESOURCE_FILE_NAME),
			r#"<Localization><CommandClass id="0x20"><Label>Basic</Label></CommandClass></Localization>"#,
		)
		.unwrap();

		let (tables, report) = load_resource(&XmlDocumentParser, dir.path());
		assert!(report.document_loaded);
		assert_eq!(tables.classes[&0x20].label(), "Basic");
	}

	proptest! {
		/// Any formatted hex number parses back, with or without prefix.
		#[test]
		fn parse_hex_accepts_formatted_numbers(n in any::<u32>(), prefixed in any::<bool>()) {
			let s = if prefixed { format!("0x{n:x}") } else { format!("{n:X}") };
			prop_assert_eq!(parse_hex(&s), Some(u64::from(n)));
		}
	}
}
