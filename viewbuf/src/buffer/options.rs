// SPDX-License-Identifier: Apache-2.0

use crate::DEFAULT_SEGMENT_SIZE;

/// Options for tuning [`ViewBuffer`](super::ViewBuffer)'s behavior.
///
/// # Allocation
///
/// By default, the buffer will fall back to allocating segments if borrowing the
/// pool fails. It can also be set to always allocate, ignoring the pool, or to
/// never allocate. Only a failed borrow triggers the fallback; a pool which is
/// exhausted, or which grants a segment with no free slots, fails the append.
///
/// # Segment size
///
/// The number of values in segments the buffer allocates itself. Segments claimed
/// from the pool are sized by the pool. Defaults to `256`. Allocating with a size
/// of zero fails with [`PoolError::EmptySegment`](crate::pool::PoolError::EmptySegment).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct BufferOptions {
	pub allocation: Allocate,
	pub segment_size: usize,
}

/// Where a buffer gets new segments from.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Allocate {
	/// Only claim from the pool. A pool that is already borrowed fails the append.
	Never,
	/// Allocate every segment, never claiming from the pool. Allocated segments
	/// still go to the pool on release.
	Always,
	/// Claim from the pool, allocating only when the pool is already borrowed.
	/// Exhaustion and empty grants still fail the append.
	#[default]
	OnError,
}

impl Allocate {
	/// Returns `true` if the pool is the only segment source.
	pub fn is_never(&self) -> bool {
		matches!(self, Self::Never)
	}

	/// Returns `true` if the pool is bypassed on claims.
	pub fn is_always(&self) -> bool {
		matches!(self, Self::Always)
	}

	/// Returns `true` if a failed pool borrow falls back to allocation.
	pub fn is_on_error(&self) -> bool {
		matches!(self, Self::OnError)
	}
}

impl Default for BufferOptions {
	fn default() -> Self { Self::new() }
}

impl BufferOptions {
	/// Creates a new set of buffer options.
	pub const fn new() -> Self {
		Self {
			allocation: Allocate::OnError,
			segment_size: DEFAULT_SEGMENT_SIZE,
		}
	}

	/// Returns the segment allocation mode.
	#[inline]
	pub const fn allocation(&self) -> Allocate { self.allocation }

	/// Returns the size of allocated segments.
	#[inline]
	pub const fn segment_size(&self) -> usize { self.segment_size }

	/// Sets the segment allocation mode.
	#[inline]
	pub fn set_allocation(&mut self, value: Allocate) {
		self.allocation = value;
	}

	/// Sets the size of allocated segments.
	#[inline]
	pub fn set_segment_size(&mut self, value: usize) {
		self.segment_size = value;
	}

	/// Sets the segment allocation mode.
	#[inline]
	pub const fn with_allocation(mut self, value: Allocate) -> Self {
		self.allocation = value;
		self
	}

	/// Sets the size of allocated segments.
	#[inline]
	pub const fn with_segment_size(mut self, value: usize) -> Self {
		self.segment_size = value;
		self
	}

	/// Sets segment allocation to [`Always`](Allocate::Always).
	#[inline]
	pub const fn always_allocate(self) -> Self {
		self.with_allocation(Allocate::Always)
	}

	/// Sets segment allocation to [`Never`](Allocate::Never).
	#[inline]
	pub const fn never_allocate(self) -> Self {
		self.with_allocation(Allocate::Never)
	}

	/// Sets segment allocation to [`OnError`](Allocate::OnError).
	#[inline]
	pub const fn allocate_on_error(self) -> Self {
		self.with_allocation(Allocate::OnError)
	}
}
