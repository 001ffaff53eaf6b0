// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt::Arguments;
use pulldown_cmark_escape::{escape_html, StrWrite};
use crate::{Error, Result};
use crate::streams::TextSink;

/// Encodes raw text for emission into HTML.
pub trait HtmlEncoder {
	/// Writes `value` to `sink`, encoded.
	fn encode_to(&self, value: &str, sink: &mut dyn TextSink) -> Result;

	/// Returns `value` encoded.
	fn encode<'a>(&self, value: &'a str) -> Result<Cow<'a, str>> {
		let mut encoded = String::with_capacity(value.len());
		self.encode_to(value, &mut encoded)?;
		Ok(encoded.into())
	}
}

/// The default encoder, escaping `&`, `<`, `>`, and `"`.
#[derive(Copy, Clone, Debug, Default)]
pub struct HtmlEscape;

impl HtmlEscape {
	fn needs_escape(value: &str) -> bool {
		value.bytes().any(|byte| matches!(byte, b'&' | b'<' | b'>' | b'"'))
	}
}

impl HtmlEncoder for HtmlEscape {
	fn encode_to(&self, value: &str, sink: &mut dyn TextSink) -> Result {
		if !Self::needs_escape(value) {
			return sink.write_str(value)
		}

		escape_html(&mut SinkWriter(sink), value)
	}

	fn encode<'a>(&self, value: &'a str) -> Result<Cow<'a, str>> {
		if !Self::needs_escape(value) {
			return Ok(value.into())
		}

		let mut encoded = String::with_capacity(value.len() + 16);
		escape_html(&mut SinkWriter(&mut encoded), value)?;
		Ok(encoded.into())
	}
}

/// Streams escaped text straight into a sink.
struct SinkWriter<'s>(&'s mut dyn TextSink);

impl StrWrite for SinkWriter<'_> {
	type Error = Error;

	fn write_str(&mut self, s: &str) -> Result {
		self.0.write_str(s)
	}

	fn write_fmt(&mut self, args: Arguments) -> Result {
		self.0.write_fmt(args)
	}
}

#[cfg(test)]
mod test {
	use std::borrow::Cow;
	use pretty_assertions::assert_eq;
	use super::{HtmlEncoder, HtmlEscape};

	#[test]
	fn escape() {
		let encoded = HtmlEscape.encode("<a href=\"?x&y\">").unwrap();
		assert_eq!(encoded, "&lt;a href=&quot;?x&amp;y&quot;&gt;");
	}

	#[test]
	fn borrow_when_clean() {
		assert!(matches!(HtmlEscape.encode("plain text").unwrap(), Cow::Borrowed("plain text")));
	}

	#[test]
	fn encode_to_sink() {
		let mut sink = String::from("<p>");
		HtmlEscape.encode_to("1 < 2", &mut sink).unwrap();
		assert_eq!(sink, "<p>1 &lt; 2");
	}
}
