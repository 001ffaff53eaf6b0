// SPDX-License-Identifier: Apache-2.0

use std::iter;
use all_asserts::assert_le;
use crate::BufferValue;

/// A fixed-capacity run of buffered values, backed by an array claimed from a
/// pool. The segment owns the whole array, but only the `capacity` slots starting
/// at `offset` were granted to it; anything outside that range is stale pool data
/// and is never read.
#[derive(Debug)]
pub struct Segment {
	backing: Box<[BufferValue]>,
	offset: usize,
	capacity: usize,
	len: usize,
}

impl Segment {
	/// Creates a segment spanning the whole array.
	pub fn new(backing: Box<[BufferValue]>) -> Self {
		let capacity = backing.len();
		Self::with_range(backing, 0, capacity)
	}

	/// Creates a segment granted `capacity` slots from `offset` in the array.
	///
	/// # Panics
	///
	/// Panics if the range extends past the end of the array.
	pub fn with_range(backing: Box<[BufferValue]>, offset: usize, capacity: usize) -> Self {
		assert_le!(offset, backing.len());
		assert_le!(capacity, backing.len() - offset);
		Self { backing, offset, capacity, len: 0 }
	}

	/// Allocates a fresh segment of `size` empty values.
	pub fn allocate(size: usize) -> Self {
		Self::new(iter::repeat_with(BufferValue::default).take(size).collect())
	}

	/// Returns the index in the backing array where the segment begins.
	pub fn offset(&self) -> usize { self.offset }
	/// Returns the number of slots granted to the segment.
	pub fn capacity(&self) -> usize { self.capacity }
	/// Returns the number of values written.
	pub fn len(&self) -> usize { self.len }
	/// Returns the number of values that can be written before the segment is full.
	pub fn limit(&self) -> usize { self.capacity - self.len }

	pub fn is_empty(&self) -> bool { self.len == 0 }
	pub fn is_full(&self) -> bool { self.len == self.capacity }

	/// Returns the values written to the segment.
	pub fn values(&self) -> &[BufferValue] {
		&self.backing[self.offset..self.offset + self.len]
	}

	/// Returns the entire backing array, including slots outside the segment.
	pub fn backing(&self) -> &[BufferValue] { &self.backing }

	/// Writes a value to the next free slot.
	pub(crate) fn push(&mut self, value: BufferValue) {
		debug_assert!(!self.is_full(), "value pushed to a full segment");
		self.backing[self.offset + self.len] = value;
		self.len += 1;
	}

	/// Forgets written values. Their slots become stale and are overwritten by
	/// later pushes.
	pub(crate) fn reset(&mut self) {
		self.len = 0;
	}

	/// Consumes the segment, returning its backing array for reuse.
	pub fn into_backing(self) -> Box<[BufferValue]> { self.backing }
}
