// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hierarchical document model consumed by the resource loader.
//!
//! The loader only needs named elements with attributes, text and ordered
//! children. [`DocumentParser`] is the seam; [`XmlDocumentParser`] is the
//! quick-xml backed implementation used in production.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{DocumentError, DocumentResult};

/// One element of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
	name: String,
	attributes: Vec<(String, String)>,
	text: String,
	line: usize,
	children: Vec<Element>,
}

impl Element {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			line: 1,
			..Default::default()
		}
	}

	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((name.into(), value.into()));
		self
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	pub fn with_line(mut self, line: usize) -> Self {
		self.line = line;
		self
	}

	pub fn with_child(mut self, child: Element) -> Self {
		self.children.push(child);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// First attribute with the given name.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self
			.attributes
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Text content with surrounding whitespace removed. Empty elements yield `""`.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// 1-based source line of the opening tag.
	pub fn line(&self) -> usize {
		self.line
	}

	pub fn children(&self) -> impl Iterator<Item = &Element> {
		self.children.iter()
	}

	pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
		self.children.iter().filter(move |child| child.name == name)
	}
}

/// Capability to turn a resource file into an [`Element`] tree.
pub trait DocumentParser: Send + Sync {
	/// Parse the file at `path` and return its root element.
	fn parse_file(&self, path: &Path) -> DocumentResult<Element>;
}

/// XML implementation of [`DocumentParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDocumentParser;

impl XmlDocumentParser {
	/// Parse an in-memory XML document.
	pub fn parse_str(&self, xml: &str) -> DocumentResult<Element> {
		let mut reader = Reader::from_str(xml);
		let mut lines = LineCounter::new(xml);
		let mut stack: Vec<Element> = Vec::new();
		let mut root: Option<Element> = None;

		loop {
			let offset = reader.buffer_position();
			let event = match reader.read_event() {
				Ok(event) => event,
				Err(source) => {
					return Err(DocumentError::Xml {
						line: lines.line_at(reader.buffer_position()),
						source,
					});
				}
			};

			match event {
				Event::Start(start) => {
					let element = open_element(&start, lines.line_at(offset))?;
					stack.push(element);
				}
				Event::Empty(start) => {
					let element = open_element(&start, lines.line_at(offset))?;
					attach(&mut stack, &mut root, element);
				}
				Event::End(_) => {
					if let Some(mut element) = stack.pop() {
						let trimmed = element.text.trim();
						if trimmed.len() != element.text.len() {
							element.text = trimmed.to_string();
						}
						attach(&mut stack, &mut root, element);
					}
				}
				Event::Text(text) => {
					if let Some(current) = stack.last_mut() {
						let text = text.unescape().map_err(|source| DocumentError::Xml {
							line: lines.line_at(offset),
							source,
						})?;
						current.text.push_str(&text);
					}
				}
				Event::CData(data) => {
					if let Some(current) = stack.last_mut() {
						current
							.text
							.push_str(&String::from_utf8_lossy(&data.into_inner()));
					}
				}
				Event::Eof => break,
				// Declarations, comments, processing instructions, doctype
				_ => {}
			}
		}

		if let Some(open) = stack.pop() {
			return Err(DocumentError::UnclosedElement {
				name: open.name,
				line: open.line,
			});
		}

		root.ok_or(DocumentError::EmptyDocument)
	}
}

impl DocumentParser for XmlDocumentParser {
	fn parse_file(&self, path: &Path) -> DocumentResult<Element> {
		let xml = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		self.parse_str(&xml)
	}
}

fn open_element(start: &BytesStart<'_>, line: usize) -> DocumentResult<Element> {
	let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref())).with_line(line);

	for attr in start.attributes() {
		let attr = attr.map_err(|e| DocumentError::Xml {
			line,
			source: e.into(),
		})?;
		let value = attr
			.unescape_value()
			.map_err(|source| DocumentError::Xml { line, source })?;
		element.attributes.push((
			String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
			value.into_owned(),
		));
	}

	Ok(element)
}

/// Attach a closed element to its parent, or make it the root.
/// Only the first top-level element is kept.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
	match stack.last_mut() {
		Some(parent) => parent.children.push(element),
		None => {
			if root.is_none() {
				*root = Some(element);
			}
		}
	}
}

/// Maps byte offsets to line numbers; offsets must be non-decreasing.
struct LineCounter<'a> {
	src: &'a [u8],
	offset: usize,
	line: usize,
}

impl<'a> LineCounter<'a> {
	fn new(src: &'a str) -> Self {
		Self {
			src: src.as_bytes(),
			offset: 0,
			line: 1,
		}
	}

	fn line_at(&mut self, offset: usize) -> usize {
		let end = offset.min(self.src.len());
		if end > self.offset {
			self.line += self.src[self.offset..end]
				.iter()
				.filter(|&&b| b == b'\n')
				.count();
			self.offset = end;
		}
		self.line
	}
}
