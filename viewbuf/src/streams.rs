// SPDX-License-Identifier: Apache-2.0

mod void;

pub use void::*;

use std::fmt::Arguments;
use crate::{BufferRef, Result};

/// A destination for rendered text.
pub trait TextSink {
	/// Writes a string to the sink.
	fn write_str(&mut self, value: &str) -> Result;

	/// Writes formatted text to the sink. Allows sinks to be used with [`write!`].
	fn write_fmt(&mut self, args: Arguments<'_>) -> Result {
		if let Some(value) = args.as_str() {
			self.write_str(value)
		} else {
			self.write_str(&args.to_string())
		}
	}

	/// Writes all buffered data to its final target.
	fn flush(&mut self) -> Result { Ok(()) }

	/// Returns the sink as a [`BufferSink`] if it can take whole buffers, skipping
	/// value-by-value writes. Returns `None` by default.
	fn as_buffer_sink(&mut self) -> Option<&mut dyn BufferSink> { None }
}

/// A sink which takes whole buffers, reading their segments directly. Sinks taking
/// this path are responsible for encoding raw values themselves.
pub trait BufferSink {
	/// Writes the contents of `buffer`.
	fn write_buffer(&mut self, buffer: BufferRef<'_>) -> Result;
}

impl TextSink for String {
	fn write_str(&mut self, value: &str) -> Result {
		self.push_str(value);
		Ok(())
	}
}

impl<S: TextSink + ?Sized> TextSink for &mut S {
	fn write_str(&mut self, value: &str) -> Result {
		S::write_str(self, value)
	}

	fn write_fmt(&mut self, args: Arguments<'_>) -> Result {
		S::write_fmt(self, args)
	}

	fn flush(&mut self) -> Result {
		S::flush(self)
	}

	fn as_buffer_sink(&mut self) -> Option<&mut dyn BufferSink> {
		S::as_buffer_sink(self)
	}
}

impl<S: TextSink + ?Sized> TextSink for Box<S> {
	fn write_str(&mut self, value: &str) -> Result {
		S::write_str(self, value)
	}

	fn write_fmt(&mut self, args: Arguments<'_>) -> Result {
		S::write_fmt(self, args)
	}

	fn flush(&mut self) -> Result {
		S::flush(self)
	}

	fn as_buffer_sink(&mut self) -> Option<&mut dyn BufferSink> {
		S::as_buffer_sink(self)
	}
}
