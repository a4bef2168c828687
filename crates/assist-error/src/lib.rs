//! # assist-error
//!
//! Unified error handling for assist.
//!
//! The resolver itself never fails: an unresolvable caret is an empty result, not
//! an error. Errors only appear at the edges of the system, where trees and
//! requests come in from the outside world:
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidNodeRef`, `RangeViolation`)
//! - **ErrorStatus**: whether retrying can help (Permanent, Temporary, Persistent)
//! - **Error Context**: key/value pairs that locate the cause (node ids, offsets, paths)
//! - **Error Source**: the wrapped lower-level error, if any
//!
//! ## Usage
//!
//! ```rust
//! use assist_error::{Error, ErrorKind};
//!
//! fn check(offset: usize, len: usize) -> Result<(), Error> {
//!     if offset > len {
//!         return Err(Error::new(ErrorKind::InvalidOffset, "caret is past end of source")
//!             .with_operation("request::validate")
//!             .with_context("offset", offset.to_string())
//!             .with_context("len", len.to_string()));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Principles
//!
//! - Fallible edge functions return `assist_error::Result<T>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, callers only append context

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using the assist Error
pub type Result<T> = std::result::Result<T, Error>;
