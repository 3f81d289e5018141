// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Localized labels and help text for OpenZWave command classes and values.
//!
//! Text is read once from `ValueHelp.xml` in the configured resource directory
//! and applied to device model objects on demand:
//!
//! - [`Localization::apply_to_command_class`] sets a command class display label
//! - [`Localization::apply_to_value`] sets a value's label and help text, and
//!   the per-bit text of bit-set values
//!
//! A missing resource file is not an error: the store is empty and every
//! lookup falls back to the object's existing text.
//!
//! # Example
//!
//! ```ignore
//! use ozw_localization::Localization;
//!
//! let l10n = Localization::instance();
//! l10n.apply_to_command_class(&mut switch_binary);
//! l10n.apply_to_value(&mut level);
//! ```

mod document;
mod entry;
mod error;
mod key;
mod loader;
mod model;
mod store;

pub use document::{DocumentParser, Element, XmlDocumentParser};
pub use entry::{LabelEntry, LocalizedText, ValueEntry};
pub use error::{DocumentError, DocumentResult};
pub use key::{class_key, value_key, ValueKey, WHOLE_VALUE};
pub use loader::{parse_hex, resource_path, LoadReport, RESOURCE_FILE_NAME};
pub use model::{BitSetValue, CommandClass, Value, ValueId, ValueType};
pub use store::{ApplyOutcome, Localization};

pub use ozw_config::LocalizationConfig;
