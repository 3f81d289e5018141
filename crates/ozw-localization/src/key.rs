// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Composite lookup keys.
//!
//! Value keys pack `(command class, index, position)` into a `u64`:
//!
//! | bits  | field         |
//! |-------|---------------|
//! | 48-55 | command class |
//! | 32-47 | value index   |
//! | 0-31  | bit position  |
//!
//! A missing position is stored as [`WHOLE_VALUE`].

use std::fmt;

use serde::Serialize;

/// Position sentinel meaning "the whole value, no specific bit".
pub const WHOLE_VALUE: u32 = u32::MAX;

/// Key for a command class label: `(index << 32) | position`.
pub fn class_key(index: u16, position: Option<u32>) -> u64 {
	(u64::from(index) << 32) | u64::from(position.unwrap_or(WHOLE_VALUE))
}

/// Key for a value label/help entry: `(cc << 48) | (index << 32) | position`.
pub fn value_key(command_class: u8, index: u16, position: Option<u32>) -> u64 {
	(u64::from(command_class) << 48)
		| (u64::from(index) << 32)
		| u64::from(position.unwrap_or(WHOLE_VALUE))
}

/// A packed value key with accessors for its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ValueKey(u64);

impl ValueKey {
	pub fn new(command_class: u8, index: u16, position: Option<u32>) -> Self {
		Self(value_key(command_class, index, position))
	}

	pub fn as_u64(self) -> u64 {
		self.0
	}

	pub fn command_class(self) -> u8 {
		(self.0 >> 48) as u8
	}

	pub fn index(self) -> u16 {
		(self.0 >> 32) as u16
	}

	/// The bit position, or `None` for a whole-value key.
	pub fn position(self) -> Option<u32> {
		match self.0 as u32 {
			WHOLE_VALUE => None,
			pos => Some(pos),
		}
	}
}

impl From<ValueKey> for u64 {
	fn from(key: ValueKey) -> Self {
		key.0
	}
}

impl fmt::Display for ValueKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "cc=0x{:02x} index=0x{:04x}", self.command_class(), self.index())?;
		match self.position() {
			Some(pos) => write!(f, " pos={pos}"),
			None => Ok(()),
		}
	}
}
