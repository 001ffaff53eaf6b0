// SPDX-License-Identifier: Apache-2.0

use crate::{BufferRef, Result};
use super::{BufferSink, TextSink};

/// Returns a [`TextSink`] that writes to nowhere, dropping any text written to it.
pub fn void_sink() -> VoidSink { VoidSink }

/// A [`TextSink`] that writes to nowhere, dropping any text written to it. Whole
/// buffers are skipped without being traversed.
#[derive(Copy, Clone, Debug, Default)]
pub struct VoidSink;

impl TextSink for VoidSink {
	fn write_str(&mut self, _: &str) -> Result { Ok(()) }

	fn as_buffer_sink(&mut self) -> Option<&mut dyn BufferSink> { Some(self) }
}

impl BufferSink for VoidSink {
	/// Skips the buffer.
	fn write_buffer(&mut self, _: BufferRef<'_>) -> Result { Ok(()) }
}
