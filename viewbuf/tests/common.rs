// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use viewbuf::{BufferRef, BufferValue, HtmlEncoder, Result, Segment, ViewBuffer};
use viewbuf::pool::{MutPool, PoolContainer, PoolError};
use viewbuf::streams::{BufferSink, TextSink};

/// A pool granting segments of a fixed capacity, starting `offset` slots into an
/// array prefilled with stale values. Queued `(capacity, offset)` grants are
/// handed out first. Counts claims and collections.
#[derive(Default)]
pub struct MockPool {
	pub capacity: usize,
	pub offset: usize,
	pub claimed: usize,
	pub collected: usize,
	pub names: Vec<String>,
	/// Fail claims once this many segments were claimed.
	pub limit: Option<usize>,
	pub grants: VecDeque<(usize, usize)>,
}

impl MockPool {
	pub fn new(capacity: usize, offset: usize) -> Self {
		Self { capacity, offset, ..Self::default() }
	}

	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn with_grants(mut self, grants: impl IntoIterator<Item = (usize, usize)>) -> Self {
		self.grants.extend(grants);
		self
	}

	/// Returns the number of segments claimed but not yet collected.
	pub fn outstanding(&self) -> usize { self.claimed - self.collected }
}

impl MutPool for MockPool {
	fn claim_one(&mut self, name: &str) -> std::result::Result<Segment, PoolError> {
		if self.limit.is_some_and(|limit| self.claimed >= limit) {
			return Err(PoolError::Exhausted { name: name.to_owned() })
		}

		self.claimed += 1;
		self.names.push(name.to_owned());
		let (capacity, offset) = self.grants.pop_front().unwrap_or((self.capacity, self.offset));
		let backing = (0..offset + capacity)
			.map(|_| BufferValue::raw("stale"))
			.collect();
		Ok(Segment::with_range(backing, offset, capacity))
	}

	fn collect_one(&mut self, _: Segment) {
		self.collected += 1;
	}

	fn shed(&mut self) { }
}

pub type MockPoolContainer = PoolContainer<MockPool>;

pub fn mock_pool(capacity: usize, offset: usize) -> MockPoolContainer {
	MockPool::new(capacity, offset).into()
}

pub fn mock_buffer(pool: &MockPoolContainer) -> ViewBuffer<MockPoolContainer> {
	ViewBuffer::with_pool(pool.clone(), "test")
}

/// Passes text through unchanged, recording every call.
#[derive(Default)]
pub struct RecordingEncoder {
	pub calls: RefCell<Vec<String>>,
}

impl HtmlEncoder for RecordingEncoder {
	fn encode_to(&self, value: &str, sink: &mut dyn TextSink) -> Result {
		self.calls.borrow_mut().push(value.to_owned());
		sink.write_str(value)
	}
}

/// A sink taking whole buffers, recording what it received.
#[derive(Default)]
pub struct RecordingBufferSink {
	pub buffers: Vec<(String, usize)>,
	pub text: String,
}

impl TextSink for RecordingBufferSink {
	fn write_str(&mut self, value: &str) -> Result {
		self.text.push_str(value);
		Ok(())
	}

	fn as_buffer_sink(&mut self) -> Option<&mut dyn BufferSink> { Some(self) }
}

impl BufferSink for RecordingBufferSink {
	fn write_buffer(&mut self, buffer: BufferRef<'_>) -> Result {
		self.buffers.push((buffer.name().to_owned(), buffer.count()));
		Ok(())
	}
}

/// Returns raw values as strings, in order.
pub fn raw_values<P: viewbuf::pool::Pool>(buffer: &ViewBuffer<P>) -> Vec<String> {
	buffer.values()
		  .filter_map(BufferValue::as_raw)
		  .map(str::to_owned)
		  .collect()
}
