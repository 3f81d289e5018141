// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Text and JSON rendering of store contents.

use serde::Serialize;

use ozw_localization::{LabelEntry, LoadReport, Localization, LocalizedText, ValueEntry};

#[derive(Serialize)]
struct Dump<'a> {
	language: Option<&'a str>,
	command_classes: Vec<&'a LabelEntry>,
	values: Vec<&'a ValueEntry>,
}

pub fn summary(report: &LoadReport) -> String {
	let path = report
		.path
		.as_ref()
		.map(|p| p.display().to_string())
		.unwrap_or_else(|| "<in-memory>".to_string());

	if !report.document_loaded {
		return format!("{path}: not loaded, all lookups fall back to built-in names");
	}

	format!(
		"{path}: {} command classes, {} values, {} warnings, {} skipped nodes",
		report.command_classes, report.values, report.warnings, report.skipped_nodes
	)
}

pub fn class_line(entry: &LabelEntry) -> String {
	format!(
		"0x{:02x}  {}{}",
		entry.command_class(),
		entry.label(),
		variants(entry.labels())
	)
}

pub fn value_lines(entry: &ValueEntry) -> Vec<String> {
	let target = match entry.position() {
		Some(pos) => format!(
			"0x{:02x} 0x{:04x} bit {pos}",
			entry.command_class(),
			entry.index()
		),
		None => format!("0x{:02x} 0x{:04x}", entry.command_class(), entry.index()),
	};

	let mut lines = vec![format!(
		"{target}  {}{}",
		entry.label(),
		variants(entry.labels())
	)];
	if !entry.helps().is_empty() {
		lines.push(format!("    help: {}{}", entry.help(), variants(entry.helps())));
	}
	lines
}

fn variants(text: &LocalizedText) -> String {
	let langs = text.languages();
	if langs.is_empty() {
		return String::new();
	}
	let parts: Vec<String> = langs
		.into_iter()
		.filter_map(|lang| text.get(lang).map(|t| format!("{lang}={t}")))
		.collect();
	format!("  [{}]", parts.join(", "))
}

pub fn dump_json(store: &Localization) -> serde_json::Result<String> {
	serde_json::to_string_pretty(&Dump {
		language: store.language(),
		command_classes: store.command_classes().collect(),
		values: store.values().collect(),
	})
}
