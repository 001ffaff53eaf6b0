// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use crate::DEFAULT_SEGMENT_SIZE;

/// Options for tuning [`DefaultPool`](super::DefaultPool)'s behavior.
///
/// # Segment size
///
/// The number of values in each segment claimed from the pool. Defaults to `256`.
/// Sizes can be overridden per buffer name, so buffers which usually hold a
/// handful of values, like those of small partial views, don't claim large
/// segments.
///
/// # Retain limit
///
/// The maximum number of arrays of any one size kept for reuse. Defaults to `64`.
/// Arrays collected beyond this limit are dropped.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct PoolOptions {
	pub segment_size: usize,
	pub retain_limit: usize,
	pub named_sizes: Vec<(Cow<'static, str>, usize)>,
}

impl Default for PoolOptions {
	fn default() -> Self { Self::new() }
}

impl PoolOptions {
	/// Creates a new set of pool options.
	pub const fn new() -> Self {
		Self {
			segment_size: DEFAULT_SEGMENT_SIZE,
			retain_limit: 64,
			named_sizes: Vec::new(),
		}
	}

	/// Returns the default segment size.
	#[inline]
	pub const fn segment_size(&self) -> usize { self.segment_size }

	/// Returns the retain limit.
	#[inline]
	pub const fn retain_limit(&self) -> usize { self.retain_limit }

	/// Returns the segment size for buffers named `name`.
	pub fn segment_size_for(&self, name: &str) -> usize {
		self.named_sizes
			.iter()
			.rev()
			.find_map(|(key, size)| (key == name).then_some(*size))
			.unwrap_or(self.segment_size)
	}

	/// Sets the default segment size.
	#[inline]
	pub fn set_segment_size(&mut self, value: usize) {
		self.segment_size = value;
	}

	/// Sets the retain limit.
	#[inline]
	pub fn set_retain_limit(&mut self, value: usize) {
		self.retain_limit = value;
	}

	/// Sets the segment size for buffers named `name`.
	pub fn set_named_size(&mut self, name: impl Into<Cow<'static, str>>, value: usize) {
		self.named_sizes.push((name.into(), value));
	}

	/// Sets the default segment size.
	#[inline]
	pub fn with_segment_size(mut self, value: usize) -> Self {
		self.segment_size = value;
		self
	}

	/// Sets the retain limit.
	#[inline]
	pub fn with_retain_limit(mut self, value: usize) -> Self {
		self.retain_limit = value;
		self
	}

	/// Sets the segment size for buffers named `name`.
	pub fn with_named_size(mut self, name: impl Into<Cow<'static, str>>, value: usize) -> Self {
		self.set_named_size(name, value);
		self
	}
}
