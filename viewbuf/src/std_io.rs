// SPDX-License-Identifier: Apache-2.0

use std::{fmt, io};
use crate::{Error, Result, ResultContext};
use crate::OperationKind::Write;
use crate::streams::TextSink;

/// A [`TextSink`] writing UTF-8 to a wrapped [`io::Write`]r.
pub struct WriterSink<W: io::Write> {
	writer: Option<W>,
}

impl<W: io::Write> From<W> for WriterSink<W> {
	fn from(writer: W) -> Self {
		Self { writer: Some(writer) }
	}
}

impl<W: io::Write> WriterSink<W> {
	/// Returns `true` if the sink is closed.
	pub fn is_closed(&self) -> bool { self.writer.is_none() }

	/// Closes the underlying writer by letting it fall out of scope. Subsequent
	/// writes will fail.
	pub fn close(&mut self) {
		self.writer.take();
	}

	/// Unwraps the writer, returning `None` if the sink was closed.
	pub fn into_inner(self) -> Option<W> { self.writer }

	fn writer(&mut self) -> Result<&mut W> {
		self.writer.as_mut().ok_or_else(|| Error::closed(Write))
	}
}

impl<W: io::Write> TextSink for WriterSink<W> {
	fn write_str(&mut self, value: &str) -> Result {
		self.writer()?.write_all(value.as_bytes()).context(Write)
	}

	fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result {
		self.writer()?.write_fmt(args).context(Write)
	}

	fn flush(&mut self) -> Result {
		self.writer()?.flush().context(Write)
	}
}

/// A [`TextSink`] writing to a wrapped [`fmt::Write`]r, such as a [`Formatter`].
///
/// [`Formatter`]: fmt::Formatter
pub struct FmtSink<W: fmt::Write>(pub W);

impl<W: fmt::Write> FmtSink<W> {
	pub fn into_inner(self) -> W { self.0 }
}

impl<W: fmt::Write> TextSink for FmtSink<W> {
	fn write_str(&mut self, value: &str) -> Result {
		self.0.write_str(value).context(Write)
	}

	fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result {
		self.0.write_fmt(args).context(Write)
	}
}

#[cfg(test)]
mod test {
	use std::io;
	use pretty_assertions::assert_eq;
	use crate::ErrorKind;
	use crate::streams::TextSink;
	use super::{FmtSink, WriterSink};

	#[test]
	fn writer() {
		let mut sink = WriterSink::from(Vec::new());
		sink.write_str("<p>").unwrap();
		write!(sink, "{}</p>", 1).unwrap();
		sink.flush().unwrap();
		assert_eq!(sink.into_inner().unwrap(), b"<p>1</p>");
	}

	#[test]
	fn closed() {
		let mut sink = WriterSink::from(io::sink());
		sink.close();
		assert_eq!(sink.write_str("x").unwrap_err().kind(), ErrorKind::Closed);
	}

	#[test]
	fn fmt_writer() {
		let mut sink = FmtSink(String::new());
		sink.write_str("a").unwrap();
		write!(sink, "{}", 'b').unwrap();
		assert_eq!(sink.into_inner(), "ab");
	}
}
