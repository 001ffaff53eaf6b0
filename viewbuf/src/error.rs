// SPDX-License-Identifier: Apache-2.0

use std::{fmt, io, result};
use std::error::Error as StdError;
use std::fmt::Formatter;
use amplify_derive::Display;
use crate::pool::PoolError;

pub type ErrorBox = Box<dyn StdError + Send + Sync>;
pub type Result<T = ()> = result::Result<T, Error>;

/// The buffer operation during which an error occurred.
#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq)]
pub enum OperationKind {
	#[default]
	#[display("unknown operation")]
	Unknown,
	#[display("append to buffer")]
	Append,
	#[display("write buffer")]
	Write,
	#[display("release buffer")]
	Release,
	#[display("{0}")]
	Other(&'static str),
}

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum ErrorKind {
	#[display("segment pool error")]
	Pool,
	#[display("IO error")]
	Io,
	#[display("formatting error")]
	Format,
	#[display("sink closed")]
	Closed,
	#[display("{0}")]
	Other(&'static str),
}

#[derive(Debug)]
pub struct Error {
	op: OperationKind,
	kind: ErrorKind,
	source: Option<ErrorBox>,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self { op, kind, source } = self;
		if let Some(source) = source {
			write!(f, "{op} failed; {kind} ({source})")
		} else {
			write!(f, "{op} failed; {kind}")
		}
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		match self.source {
			Some(ref source) => Some(source.as_ref()),
			None => None
		}
	}
}

impl Error {
	pub fn new(op: OperationKind, kind: ErrorKind, source: Option<ErrorBox>) -> Self {
		Self { op, kind, source }
	}

	/// Creates a new error with a custom message.
	pub fn other(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, ErrorKind::Other(message), None)
	}

	/// Creates a new segment pool error.
	pub fn pool(op: OperationKind, error: PoolError) -> Self {
		Self::new(op, ErrorKind::Pool, Some(error.into()))
	}

	/// Creates a new IO error.
	pub fn io(op: OperationKind, error: io::Error) -> Self {
		Self::new(op, ErrorKind::Io, Some(error.into()))
	}

	/// Creates a new formatting error.
	pub fn format(op: OperationKind) -> Self {
		Self::new(op, ErrorKind::Format, Some(fmt::Error.into()))
	}

	/// Creates a new "closed" error.
	pub fn closed(op: OperationKind) -> Self {
		Self::new(op, ErrorKind::Closed, None)
	}

	/// Returns the operation kind.
	pub fn operation(&self) -> OperationKind { self.op }

	/// Sets the operation kind.
	pub fn with_operation(mut self, op: OperationKind) -> Self {
		self.op = op;
		self
	}

	/// Returns the error kind.
	pub fn kind(&self) -> ErrorKind { self.kind }

	/// Returns the source downcast into a pool error, if possible.
	pub fn pool_source(&self) -> Option<&PoolError> {
		self.source.as_ref()?.downcast_ref()
	}

	/// Returns the source downcast into an IO error, if possible.
	pub fn io_source(&self) -> Option<&io::Error> {
		self.source.as_ref()?.downcast_ref()
	}
}

impl From<PoolError> for Error {
	fn from(value: PoolError) -> Self {
		Self::pool(OperationKind::Unknown, value)
	}
}

impl From<io::Error> for Error {
	fn from(value: io::Error) -> Self {
		Self::io(OperationKind::Unknown, value)
	}
}

impl From<fmt::Error> for Error {
	fn from(_: fmt::Error) -> Self {
		Self::format(OperationKind::Unknown)
	}
}

/// Attaches an operation to a failed result.
pub trait ResultContext<T> {
	fn context(self, op: OperationKind) -> Result<T>;
}

impl<T> ResultContext<T> for result::Result<T, PoolError> {
	fn context(self, op: OperationKind) -> Result<T> {
		self.map_err(|error| Error::pool(op, error))
	}
}

impl<T> ResultContext<T> for io::Result<T> {
	fn context(self, op: OperationKind) -> Result<T> {
		self.map_err(|error| Error::io(op, error))
	}
}

impl<T> ResultContext<T> for result::Result<T, fmt::Error> {
	fn context(self, op: OperationKind) -> Result<T> {
		self.map_err(|_| Error::format(op))
	}
}

impl<T> ResultContext<T> for Result<T> {
	/// Sets the operation only if it's unknown, keeping the innermost context.
	fn context(self, op: OperationKind) -> Result<T> {
		self.map_err(|error|
			if let OperationKind::Unknown = error.op {
				error.with_operation(op)
			} else {
				error
			}
		)
	}
}
