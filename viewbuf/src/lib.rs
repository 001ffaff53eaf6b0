// SPDX-License-Identifier: Apache-2.0

//! ## How it works
//!
//! Markup is rendered into a [`ViewBuffer`] one piece at a time. Each piece is a
//! [`BufferValue`]: either *raw* text, which is escaped when the buffer is written
//! out, or [*safe content*](SafeContent), which is emitted verbatim. Nothing is
//! escaped or concatenated while appending; the buffer only records values in
//! order.
//!
//! ### Segments
//!
//! Values are stored in fixed-capacity [`Segment`]s claimed from a [pool]. When
//! the last segment fills up, the buffer claims another one and continues there,
//! so appending never reallocates or moves values already written. A pool may
//! grant a segment starting part way into a recycled array, with stale entries in
//! front of it; the buffer only ever reads and writes within the range granted
//! to it. Segment capacities are chosen by the pool per buffer name and can vary
//! from one claim to the next.
//!
//! ### Writing
//!
//! [`ViewBuffer::write_to`] first asks the sink whether it can take the buffer
//! whole, through [`TextSink::as_buffer_sink`]. Sinks that understand segmented
//! buffers receive it directly and take over escaping. Otherwise every live value
//! is written in append order, raw values passing through the [`HtmlEncoder`].
//!
//! ### Recycling
//!
//! Segments belong to the buffer from the moment they are claimed until the
//! buffer is released, either explicitly with [`ViewBuffer::release`] or when it
//! is dropped. Each segment goes back to the pool exactly once. Clearing a buffer
//! does not touch the pool; cleared segments are reused by later appends and
//! held until release.
//!
//! [pool]: pool::Pool
//! [`TextSink::as_buffer_sink`]: streams::TextSink::as_buffer_sink

mod buffer;
mod encoder;
mod error;
pub mod pool;
mod segment;
mod std_io;
pub mod streams;
mod value;

pub use buffer::*;
pub use encoder::*;
pub use error::*;
pub use pool::pool;
pub use segment::Segment;
pub use std_io::*;
pub use value::*;

/// The default number of values per segment.
pub const DEFAULT_SEGMENT_SIZE: usize = 256;

/// The name given to buffers created with [`ViewBuffer::default`].
pub const DEFAULT_BUFFER_NAME: &str = "default";
