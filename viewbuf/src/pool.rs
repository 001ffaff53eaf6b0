// SPDX-License-Identifier: Apache-2.0

mod options;

pub use options::*;

use std::cell::{BorrowMutError, RefCell, RefMut};
use std::collections::HashMap;
use std::ops::DerefMut;
use std::rc::Rc;
use tracing::debug;
use crate::{BufferValue, Segment};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PoolError {
	#[error("failed to borrow the pool")]
	Borrow,
	#[error("pool exhausted while claiming a segment for \"{name}\"")]
	Exhausted { name: String },
	#[error("pool granted a segment with no free slots for \"{name}\"")]
	EmptySegment { name: String },
}

impl From<BorrowMutError> for PoolError {
	fn from(_: BorrowMutError) -> Self { Self::Borrow }
}

/// A shared handle to a segment pool.
pub trait Pool: Clone {
	type Pool: MutPool + ?Sized;
	type Ref<'p>: DerefMut<Target = Self::Pool> where Self: 'p;

	/// Borrows the pool mutably, locking it for the duration of the borrow.
	fn try_borrow(&self) -> Result<Self::Ref<'_>, PoolError>;

	/// Returns `true` if both handles refer to the same pool, so segments claimed
	/// through one may be collected through the other.
	fn same_pool(&self, other: &Self) -> bool;

	/// Claims a single segment for the buffer named `name`.
	fn claim_one(&self, name: &str) -> Result<Segment, PoolError> {
		self.try_borrow()?.claim_one(name)
	}

	/// Collects a single segment back into the pool.
	fn collect_one(&self, segment: Segment) -> Result<(), PoolError> {
		self.try_borrow()?.collect_one(segment);
		Ok(())
	}

	/// Collects many segments back into the pool. If the pool can't be borrowed,
	/// no segments are taken from `segments`.
	fn collect(&self, segments: impl IntoIterator<Item = Segment>) -> Result<(), PoolError> {
		let mut pool = self.try_borrow()?;
		for segment in segments {
			pool.collect_one(segment);
		}
		Ok(())
	}

	/// Clears segments from the pool to free space. The actual segment count to be
	/// cleared is left up to implementation.
	fn shed(&self) -> Result<(), PoolError> {
		self.try_borrow()?.shed();
		Ok(())
	}
}

/// A mutably-borrowed pool, usually from a [`RefCell`].
pub trait MutPool {
	/// Claims a single segment for the buffer named `name`. The name lets the pool
	/// size segments per kind of buffer; it has no other meaning.
	///
	/// The segment is owned by the caller until it's collected. Its granted range
	/// may start anywhere in the backing array.
	fn claim_one(&mut self, name: &str) -> Result<Segment, PoolError>;

	/// Collects a single segment back into the pool.
	fn collect_one(&mut self, segment: Segment);

	/// Clears segments from the pool to free space. The actual segment count to be
	/// cleared is left up to implementation.
	fn shed(&mut self);
}

/// A cloneable, reference-counted handle to a [`MutPool`].
pub struct PoolContainer<P: MutPool>(Rc<RefCell<P>>);

impl<P: MutPool> PoolContainer<P> {
	pub fn new(pool: P) -> Self { pool.into() }
}

impl<P: MutPool> From<P> for PoolContainer<P> {
	fn from(pool: P) -> Self {
		Self(Rc::new(RefCell::new(pool)))
	}
}

impl<P: MutPool> Clone for PoolContainer<P> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<P: MutPool + Default> Default for PoolContainer<P> {
	fn default() -> Self { P::default().into() }
}

impl<P: MutPool + 'static> Pool for PoolContainer<P> {
	type Pool = P;
	type Ref<'p> = RefMut<'p, P> where Self: 'p;

	fn try_borrow(&self) -> Result<Self::Ref<'_>, PoolError> {
		Ok(self.0.try_borrow_mut()?)
	}

	fn same_pool(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

pub type DefaultPoolContainer = PoolContainer<DefaultPool>;

thread_local! {
	static POOL: DefaultPoolContainer = DefaultPoolContainer::default();
}

/// Clones a shared reference to the thread's default segment pool.
pub fn pool() -> DefaultPoolContainer { POOL.with(Clone::clone) }

/// The default pool, recycling backing arrays by size.
#[derive(Debug, Default)]
pub struct DefaultPool {
	options: PoolOptions,
	free: HashMap<usize, Vec<Box<[BufferValue]>>>,
}

impl DefaultPool {
	pub fn new(options: PoolOptions) -> Self {
		Self { options, free: HashMap::new() }
	}

	/// Returns the options used to create the pool.
	pub fn options(&self) -> &PoolOptions { &self.options }

	/// Returns the number of arrays held for reuse.
	pub fn retained(&self) -> usize {
		self.free.values().map(Vec::len).sum()
	}

	/// Allocates arrays for `count` segments of the buffer named `name` ahead of
	/// time, up to the retention limit.
	pub fn reserve(&mut self, name: &str, count: usize) {
		let size = self.options.segment_size_for(name);
		let limit = self.options.retain_limit();
		let free = self.free.entry(size).or_default();
		let count = count.min(limit.saturating_sub(free.len()));
		free.extend((0..count).map(|_| Segment::allocate(size).into_backing()));
	}
}

impl MutPool for DefaultPool {
	fn claim_one(&mut self, name: &str) -> Result<Segment, PoolError> {
		let size = self.options.segment_size_for(name);
		let backing = self.free
						  .get_mut(&size)
						  .and_then(Vec::pop)
						  .unwrap_or_else(|| Segment::allocate(size).into_backing());
		Ok(Segment::new(backing))
	}

	fn collect_one(&mut self, segment: Segment) {
		let mut backing = segment.into_backing();
		let free = self.free.entry(backing.len()).or_default();
		if free.len() >= self.options.retain_limit() {
			debug!(size = backing.len(), "pool retention limit reached, dropping array");
			return
		}

		// Drop old values so pooled arrays don't keep rendered content alive.
		backing.fill_with(BufferValue::default);
		free.push(backing);
	}

	fn shed(&mut self) {
		debug!(retained = self.retained(), "shedding pooled arrays");
		self.free.clear();
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use crate::BufferValue;
	use super::{DefaultPool, MutPool, Pool, PoolContainer, PoolError, PoolOptions};

	#[test]
	fn sizes_by_name() {
		let mut pool = DefaultPool::new(
			PoolOptions::new()
				.with_segment_size(16)
				.with_named_size("tag-helper", 4)
		);
		assert_eq!(pool.claim_one("view").unwrap().capacity(), 16);
		assert_eq!(pool.claim_one("tag-helper").unwrap().capacity(), 4);
	}

	#[test]
	fn recycles_cleared_arrays() {
		let mut pool = DefaultPool::new(PoolOptions::new().with_segment_size(2));
		let mut segment = pool.claim_one("view").unwrap();
		segment.push(BufferValue::raw("a"));
		pool.collect_one(segment);
		assert_eq!(pool.retained(), 1);

		let segment = pool.claim_one("view").unwrap();
		assert_eq!(pool.retained(), 0);
		assert!(segment.is_empty());
		assert_eq!(segment.backing()[0].as_raw(), Some(""));
	}

	#[test]
	fn retain_limit() {
		let mut pool = DefaultPool::new(
			PoolOptions::new()
				.with_segment_size(2)
				.with_retain_limit(1)
		);
		let a = pool.claim_one("view").unwrap();
		let b = pool.claim_one("view").unwrap();
		pool.collect_one(a);
		pool.collect_one(b);
		assert_eq!(pool.retained(), 1);

		pool.shed();
		assert_eq!(pool.retained(), 0);
	}

	#[test]
	fn reserve() {
		let mut pool = DefaultPool::new(PoolOptions::new().with_retain_limit(3));
		pool.reserve("view", 5);
		assert_eq!(pool.retained(), 3);
	}

	#[test]
	fn borrow_conflict() {
		let pool = PoolContainer::new(DefaultPool::default());
		let _guard = pool.try_borrow().unwrap();
		assert_eq!(pool.claim_one("view").unwrap_err(), PoolError::Borrow);
	}

	#[test]
	fn same_pool() {
		let pool = PoolContainer::new(DefaultPool::default());
		assert!(pool.same_pool(&pool.clone()));
		assert!(!pool.same_pool(&PoolContainer::new(DefaultPool::default())));
	}
}
