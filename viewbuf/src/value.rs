// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;
use crate::{HtmlEncoder, Result};
use crate::streams::TextSink;

/// Content which can write itself as HTML. Implementors are trusted to produce
/// markup that is safe to emit verbatim; the encoder is passed along for any
/// nested raw text, but using it is up to the implementation.
pub trait RenderHtml {
	fn write_to(&self, sink: &mut dyn TextSink, encoder: &dyn HtmlEncoder) -> Result;
}

/// Pre-escaped content, emitted without further encoding.
#[derive(Clone)]
pub enum SafeContent {
	/// Markup text known to need no escaping.
	Html(Cow<'static, str>),
	/// Content rendering itself.
	Render(Rc<dyn RenderHtml>),
}

impl SafeContent {
	/// Wraps markup text as safe content.
	pub fn html(value: impl Into<Cow<'static, str>>) -> Self {
		Self::Html(value.into())
	}

	/// Wraps a renderable value as safe content.
	pub fn render(content: impl RenderHtml + 'static) -> Self {
		Self::Render(Rc::new(content))
	}

	/// Returns the markup text if this is [`Html`](Self::Html) content.
	pub fn as_html(&self) -> Option<&str> {
		match self {
			Self::Html(html) => Some(&**html),
			Self::Render(_) => None
		}
	}
}

impl RenderHtml for SafeContent {
	fn write_to(&self, sink: &mut dyn TextSink, encoder: &dyn HtmlEncoder) -> Result {
		match self {
			Self::Html(html) => sink.write_str(html),
			Self::Render(content) => content.write_to(sink, encoder)
		}
	}
}

impl From<Rc<dyn RenderHtml>> for SafeContent {
	fn from(value: Rc<dyn RenderHtml>) -> Self { Self::Render(value) }
}

impl Debug for SafeContent {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Html(html) => f.debug_tuple("Html").field(html).finish(),
			Self::Render(_) => f.debug_tuple("Render").finish_non_exhaustive()
		}
	}
}

/// A single buffered item.
#[derive(Clone, Debug)]
pub enum BufferValue {
	/// Text escaped when written.
	Raw(Cow<'static, str>),
	/// Content written verbatim.
	Safe(SafeContent),
}

impl BufferValue {
	pub fn raw(value: impl Into<Cow<'static, str>>) -> Self {
		Self::Raw(value.into())
	}

	pub fn html(value: impl Into<Cow<'static, str>>) -> Self {
		Self::Safe(SafeContent::html(value))
	}

	pub fn is_raw(&self) -> bool { matches!(self, Self::Raw(_)) }
	pub fn is_safe(&self) -> bool { matches!(self, Self::Safe(_)) }

	/// Returns the text of a raw value.
	pub fn as_raw(&self) -> Option<&str> {
		match self {
			Self::Raw(raw) => Some(&**raw),
			Self::Safe(_) => None
		}
	}

	/// Returns the markup text of a safe [`Html`](SafeContent::Html) value.
	pub fn as_html(&self) -> Option<&str> {
		match self {
			Self::Raw(_) => None,
			Self::Safe(content) => content.as_html()
		}
	}

	/// Writes the value, passing raw text through `encoder`.
	pub fn write_to(&self, sink: &mut dyn TextSink, encoder: &dyn HtmlEncoder) -> Result {
		match self {
			Self::Raw(raw) => encoder.encode_to(raw, sink),
			Self::Safe(content) => content.write_to(sink, encoder)
		}
	}
}

impl Default for BufferValue {
	fn default() -> Self { Self::Raw(Cow::Borrowed("")) }
}

impl From<SafeContent> for BufferValue {
	fn from(value: SafeContent) -> Self { Self::Safe(value) }
}
