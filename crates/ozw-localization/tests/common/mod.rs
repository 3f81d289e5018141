// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared test support: device model doubles and a warning counter.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ozw_localization::{BitSetValue, CommandClass, Value, ValueId, ValueType};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

pub fn fixtures_dir() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Counts WARN events seen while installed.
#[derive(Clone, Default)]
pub struct WarningCounter {
	count: Arc<AtomicUsize>,
}

impl WarningCounter {
	pub fn get(&self) -> usize {
		self.count.load(Ordering::SeqCst)
	}
}

impl<S: Subscriber> Layer<S> for WarningCounter {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		if *event.metadata().level() == Level::WARN {
			self.count.fetch_add(1, Ordering::SeqCst);
		}
	}
}

/// Run `f` with a thread-local subscriber and return the number of warnings it logged.
pub fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
	let counter = WarningCounter::default();
	let subscriber = tracing_subscriber::registry().with(counter.clone());
	let out = tracing::subscriber::with_default(subscriber, f);
	(out, counter.get())
}

pub struct FakeValue {
	pub id: ValueId,
	pub label: String,
	pub help: String,
}

impl FakeValue {
	pub fn new(command_class_id: u8, index: u16) -> Self {
		Self {
			id: ValueId::new(command_class_id, index, ValueType::Byte),
			label: "untouched".to_string(),
			help: "untouched help".to_string(),
		}
	}
}

impl Value for FakeValue {
	fn value_id(&self) -> ValueId {
		self.id
	}

	fn set_label(&mut self, label: &str) {
		self.label = label.to_string();
	}

	fn set_help(&mut self, help: &str) {
		self.help = help.to_string();
	}
}

pub struct FakeBitSet {
	pub value: FakeValue,
	pub size: u8,
	pub bit_labels: HashMap<u8, String>,
	pub bit_helps: HashMap<u8, String>,
}

impl FakeBitSet {
	pub fn new(command_class_id: u8, index: u16, size: u8) -> Self {
		let mut value = FakeValue::new(command_class_id, index);
		value.id.value_type = ValueType::BitSet;
		Self {
			value,
			size,
			bit_labels: HashMap::new(),
			bit_helps: HashMap::new(),
		}
	}
}

impl Value for FakeBitSet {
	fn value_id(&self) -> ValueId {
		self.value.id
	}

	fn set_label(&mut self, label: &str) {
		self.value.set_label(label);
	}

	fn set_help(&mut self, help: &str) {
		self.value.set_help(help);
	}

	fn as_bit_set_mut(&mut self) -> Option<&mut dyn BitSetValue> {
		Some(self)
	}
}

impl BitSetValue for FakeBitSet {
	fn size(&self) -> u8 {
		self.size
	}

	fn set_bit_label(&mut self, pos: u8, label: &str) {
		self.bit_labels.insert(pos, label.to_string());
	}

	fn set_bit_help(&mut self, pos: u8, help: &str) {
		self.bit_helps.insert(pos, help.to_string());
	}
}

pub struct FakeCommandClass {
	pub id: u8,
	pub name: &'static str,
	pub label: Option<String>,
}

impl FakeCommandClass {
	pub fn new(id: u8, name: &'static str) -> Self {
		Self {
			id,
			name,
			label: None,
		}
	}
}

impl CommandClass for FakeCommandClass {
	fn command_class_id(&self) -> u8 {
		self.id
	}

	fn command_class_name(&self) -> &str {
		self.name
	}

	fn set_command_class_label(&mut self, label: &str) {
		self.label = Some(label.to_string());
	}
}
