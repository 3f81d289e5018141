// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for document parsing.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while reading a structured resource document.
#[derive(Error, Debug)]
pub enum DocumentError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed XML at line {line}: {source}")]
	Xml {
		line: usize,
		#[source]
		source: quick_xml::Error,
	},

	#[error("document has no root element")]
	EmptyDocument,

	#[error("unclosed element <{name}> opened at line {line}")]
	UnclosedElement { name: String, line: usize },
}
