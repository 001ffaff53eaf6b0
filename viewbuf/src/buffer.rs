// SPDX-License-Identifier: Apache-2.0

mod options;
mod write;

pub use options::*;
pub use write::*;

use std::borrow::Cow;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::result;
use tracing::{debug, trace, warn};
use crate::pool::{DefaultPoolContainer, MutPool, Pool, pool, PoolError};
use crate::{BufferValue, DEFAULT_BUFFER_NAME, Result, ResultContext, SafeContent, Segment};
use crate::OperationKind::{Append, Release};

/// A segmented buffer of markup values, claiming segments from a pool as it grows
/// and returning them when released or dropped.
///
/// Values are stored in append order across the buffer's segments. Every segment
/// but the last is full; the last is the *current* segment, receiving appends.
pub struct ViewBuffer<P: Pool = DefaultPoolContainer> {
	name: Cow<'static, str>,
	pool: P,
	segments: Vec<Segment>,
	/// Segments detached by `clear`, held until release.
	retired: Vec<Segment>,
	options: BufferOptions,
}

impl Default for ViewBuffer {
	fn default() -> Self { Self::named(DEFAULT_BUFFER_NAME) }
}

impl ViewBuffer {
	/// Creates a new buffer on the thread's default pool.
	pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
		Self::new(pool(), name, BufferOptions::default())
	}
}

impl<P: Pool> Debug for ViewBuffer<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewBuffer")
			.field("name", &self.name)
			.field("segments", &self.segments)
			.field("retired", &self.retired.len())
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}

impl<P: Pool> ViewBuffer<P> {
	/// Creates a new, empty buffer. No segments are claimed until the first append.
	pub fn new(pool: P, name: impl Into<Cow<'static, str>>, options: BufferOptions) -> Self {
		Self {
			name: name.into(),
			pool,
			segments: Vec::new(),
			retired: Vec::new(),
			options,
		}
	}

	/// Creates a new buffer on `pool` with default options.
	pub fn with_pool(pool: P, name: impl Into<Cow<'static, str>>) -> Self {
		Self::new(pool, name, BufferOptions::default())
	}

	/// Returns the name segments are claimed under.
	pub fn name(&self) -> &str { &self.name }

	/// Returns the options used to create the buffer.
	pub fn options(&self) -> BufferOptions { self.options }

	/// Returns the live segments, in append order.
	pub fn segments(&self) -> &[Segment] { &self.segments }

	/// Returns the number of values in the current segment.
	pub fn current_count(&self) -> usize {
		self.segments.last().map_or(0, Segment::len)
	}

	/// Returns the number of values in the buffer.
	pub fn count(&self) -> usize {
		self.segments.iter().map(Segment::len).sum()
	}

	/// Returns `true` if the buffer holds no values.
	pub fn is_empty(&self) -> bool {
		self.segments.iter().all(Segment::is_empty)
	}

	/// Returns an iterator over all values, in append order.
	pub fn values(&self) -> impl Iterator<Item = &BufferValue> {
		self.segments.iter().flat_map(Segment::values)
	}

	/// Returns a read-only view of the buffer's contents.
	pub fn as_buffer_ref(&self) -> BufferRef<'_> {
		BufferRef::new(&self.name, &self.segments)
	}

	/// Appends raw text, escaped when written.
	pub fn append(&mut self, value: impl Into<Cow<'static, str>>) -> Result {
		self.append_value(BufferValue::Raw(value.into()))
	}

	/// Appends markup text which needs no escaping.
	pub fn append_html(&mut self, value: impl Into<Cow<'static, str>>) -> Result {
		self.append_value(SafeContent::html(value).into())
	}

	/// Appends pre-escaped content.
	pub fn append_content(&mut self, content: impl Into<SafeContent>) -> Result {
		self.append_value(BufferValue::Safe(content.into()))
	}

	/// Appends a value to the current segment, starting a new segment if there is
	/// none or it's full. Segments detached by [`clear`](Self::clear) are reused
	/// before any are claimed from the pool. Fails only if a segment couldn't be
	/// claimed; the value is dropped in that case.
	pub fn append_value(&mut self, value: BufferValue) -> Result {
		if let Some(segment) = self.segments.last_mut().filter(|segment| !segment.is_full()) {
			segment.push(value);
			return Ok(())
		}

		let mut segment = match self.retired.pop() {
			Some(mut segment) => {
				segment.reset();
				segment
			}
			None => self.claim().context(Append)?
		};
		segment.push(value);
		self.segments.push(segment);
		Ok(())
	}

	/// Clears the buffer without touching the pool. Its segments are held until
	/// the buffer is released, and are reused by later appends.
	pub fn clear(&mut self) {
		self.retired.append(&mut self.segments);
	}

	/// Returns all segments to the pool, leaving the buffer empty. Each segment is
	/// collected exactly once. If the pool can't be borrowed, the buffer is left
	/// unchanged.
	pub fn release(&mut self) -> Result {
		let Self { name, pool, segments, retired, .. } = self;
		if segments.is_empty() && retired.is_empty() {
			return Ok(())
		}

		let mut pool = pool.try_borrow().context(Release)?;
		trace!(
			buffer = %name,
			segments = segments.len() + retired.len(),
			"returning segments to the pool"
		);
		for segment in segments.drain(..).chain(retired.drain(..)) {
			pool.collect_one(segment);
		}
		Ok(())
	}

	/// Appends clones of all values to `target`.
	pub fn copy_to(&self, target: &mut ViewBuffer<impl Pool>) -> Result {
		for value in self.values() {
			target.append_value(value.clone())?;
		}
		Ok(())
	}

	/// Moves all values to `target`, leaving this buffer empty. Whole segments are
	/// handed over when both buffers share a pool and `target` has no partially
	/// filled segment. Otherwise values are copied, and this buffer is only
	/// cleared once all of them were appended.
	pub fn move_to(&mut self, target: &mut ViewBuffer<P>) -> Result {
		let whole = self.pool.same_pool(&target.pool) &&
					target.segments.last().map_or(true, Segment::is_full);
		if whole {
			target.segments.append(&mut self.segments);
		} else {
			self.copy_to(target)?;
			self.clear();
		}
		Ok(())
	}

	fn claim(&self) -> result::Result<Segment, PoolError> {
		let Self { name, pool, options, .. } = self;
		let segment = match options.allocation {
			Allocate::Always => return self.allocate(),
			Allocate::Never => pool.claim_one(name)?,
			Allocate::OnError => match pool.claim_one(name) {
				Err(PoolError::Borrow) => {
					debug!(buffer = %name, "pool unavailable, allocating segment");
					return self.allocate()
				}
				result => result?
			}
		};

		if segment.capacity() == 0 {
			if let Err(error) = pool.collect_one(segment) {
				warn!(buffer = %name, %error, "empty segment could not be returned to the pool");
			}
			return Err(PoolError::EmptySegment { name: name.to_string() })
		}

		trace!(
			buffer = %name,
			capacity = segment.capacity(),
			offset = segment.offset(),
			"claimed segment"
		);
		Ok(segment)
	}

	fn allocate(&self) -> result::Result<Segment, PoolError> {
		let Self { name, options, .. } = self;
		if options.segment_size == 0 {
			return Err(PoolError::EmptySegment { name: name.to_string() })
		}

		trace!(buffer = %name, capacity = options.segment_size, "allocated segment");
		Ok(Segment::allocate(options.segment_size))
	}
}

impl<P: Pool> Drop for ViewBuffer<P> {
	fn drop(&mut self) {
		if let Err(error) = self.release() {
			warn!(buffer = %self.name, %error, "segments could not be returned to the pool");
		}
	}
}
