// SPDX-License-Identifier: Apache-2.0

use tracing::trace;
use crate::pool::Pool;
use crate::{BufferValue, HtmlEncoder, RenderHtml, Result, ResultContext, Segment, ViewBuffer};
use crate::OperationKind::Write;
use crate::streams::TextSink;

/// A borrowed view of a buffer's live segments, handed to
/// [`BufferSink`](crate::streams::BufferSink)s.
#[derive(Copy, Clone, Debug)]
pub struct BufferRef<'b> {
	name: &'b str,
	segments: &'b [Segment],
}

impl<'b> BufferRef<'b> {
	pub(crate) fn new(name: &'b str, segments: &'b [Segment]) -> Self {
		Self { name, segments }
	}

	/// Returns the name of the buffer.
	pub fn name(&self) -> &'b str { self.name }

	/// Returns the buffer's segments, in append order.
	pub fn segments(&self) -> &'b [Segment] { self.segments }

	/// Returns an iterator over all values, in append order.
	pub fn values(&self) -> impl Iterator<Item = &'b BufferValue> {
		self.segments.iter().flat_map(Segment::values)
	}

	/// Returns the number of values.
	pub fn count(&self) -> usize {
		self.segments.iter().map(Segment::len).sum()
	}

	/// Writes every value to `sink` in order, passing raw values through `encoder`
	/// and safe content verbatim. Stops at the first failure, leaving what was
	/// written so far in the sink.
	pub fn write_to(&self, sink: &mut dyn TextSink, encoder: &dyn HtmlEncoder) -> Result {
		for value in self.values() {
			value.write_to(sink, encoder).context(Write)?;
		}
		Ok(())
	}
}

impl<P: Pool> ViewBuffer<P> {
	/// Writes the buffer to `sink`. Sinks which take whole buffers receive it
	/// directly and handle encoding themselves; otherwise values are written in
	/// order, raw values passing through `encoder`. The buffer isn't cleared.
	pub fn write_to(&self, sink: &mut dyn TextSink, encoder: &dyn HtmlEncoder) -> Result {
		let buffer = self.as_buffer_ref();
		if let Some(buffer_sink) = sink.as_buffer_sink() {
			trace!(buffer = buffer.name(), "writing whole buffer to sink");
			return buffer_sink.write_buffer(buffer).context(Write)
		}

		buffer.write_to(sink, encoder)
	}

	/// Renders the buffer into a new string.
	pub fn to_html_string(&self, encoder: &dyn HtmlEncoder) -> Result<String> {
		let mut html = String::with_capacity(self.count() * 8);
		self.write_to(&mut html, encoder)?;
		Ok(html)
	}
}

/// Buffers can be nested in other buffers as safe content.
impl<P: Pool> RenderHtml for ViewBuffer<P> {
	fn write_to(&self, sink: &mut dyn TextSink, encoder: &dyn HtmlEncoder) -> Result {
		ViewBuffer::<P>::write_to(self, sink, encoder)
	}
}
