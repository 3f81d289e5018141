// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Contracts the device model implements so the store can apply text to it.

/// The declared type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Bool,
	Byte,
	Decimal,
	Int,
	List,
	Schedule,
	Short,
	String,
	Button,
	Raw,
	BitSet,
}

/// The parts of a value's identity the store keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId {
	pub command_class_id: u8,
	pub index: u16,
	pub value_type: ValueType,
}

impl ValueId {
	pub fn new(command_class_id: u8, index: u16, value_type: ValueType) -> Self {
		Self {
			command_class_id,
			index,
			value_type,
		}
	}
}

/// A value whose label and help text can be set.
pub trait Value {
	fn value_id(&self) -> ValueId;

	fn set_label(&mut self, label: &str);

	fn set_help(&mut self, help: &str);

	/// Bit-level access for values of type [`ValueType::BitSet`].
	fn as_bit_set_mut(&mut self) -> Option<&mut dyn BitSetValue> {
		None
	}
}

/// Per-bit label and help text of a bit-set value.
pub trait BitSetValue {
	/// Number of bits; positions run from `0` to `size - 1`.
	fn size(&self) -> u8;

	fn set_bit_label(&mut self, pos: u8, label: &str);

	fn set_bit_help(&mut self, pos: u8, help: &str);
}

/// A command class whose display label can be set.
pub trait CommandClass {
	fn command_class_id(&self) -> u8;

	/// Built-in name, used when no localized label exists.
	fn command_class_name(&self) -> &str;

	fn set_command_class_label(&mut self, label: &str);
}
