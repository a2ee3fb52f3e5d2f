// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types for encode, decode, streaming and codec resolution.
//!
//! One condition is deliberately *not* an error: a buffer that ends before
//! the value it holds does. That outcome is [`Decoded::Partial`] in the wire
//! primitives and only ever drives the streaming reader's fetch-and-retry
//! loop. The synchronous surface of the same condition is
//! [`Error::TruncatedMessage`], raised by [`Reader`]-based reads where no
//! further bytes can arrive.
//!
//! Error constructors are `#[cold]` so the successful paths of the buffer
//! and wire routines stay small, and `#[track_caller]` so a failing test
//! points at the call site that produced the error.
//!
//! [`Decoded::Partial`]: crate::wire::Decoded::Partial
//! [`Reader`]: crate::buffer::Reader

use std::borrow::Cow;

use thiserror::Error;

/// Error type for all mopack operations.
///
/// Construct variants through the static constructor functions
/// ([`Error::invalid_format`], [`Error::unexpected_type`], ...) rather than
/// directly; the constructors accept anything convertible into a
/// `Cow<'static, str>` and keep construction on a cold path.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A leading byte that no MessagePack encoding assigns (only 0xc1).
    ///
    /// Fatal for the current decode; more input cannot repair it.
    #[error("invalid format code 0x{0:02x} at offset {1}")]
    InvalidFormat(u8, usize),

    /// A recognized format code of the wrong kind, e.g. an integer where an
    /// array header was requested.
    #[error("{0}")]
    UnexpectedType(Cow<'static, str>),

    /// A wire value that does not fit the requested integer width.
    #[error("{0}")]
    IntegerOverflow(Cow<'static, str>),

    /// A str payload that is not valid UTF-8.
    #[error("invalid utf-8 in string payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Structurally valid framing around semantically invalid content,
    /// e.g. a timestamp extension with an unknown payload length.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// A fully-buffered message ended before the value did.
    #[error("message ends before the value does")]
    TruncatedMessage,

    /// The streaming byte source closed while a message was partially
    /// buffered. The reader is unusable afterwards.
    #[error("byte source closed with {0} bytes of a partial message buffered")]
    TruncatedStream(usize),

    /// No formatter is registered for the requested type.
    #[error("no formatter registered for `{type_name}` in resolver `{resolver}`")]
    ResolutionFailed {
        type_name: &'static str,
        resolver: &'static str,
    },

    /// Nesting deeper than the decoder is willing to follow.
    #[error("nesting depth {0} exceeds the decoder limit")]
    DepthExceeded(u32),

    /// I/O failure reported by the streaming byte source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new [`Error::InvalidFormat`] for `code` seen at `offset`.
    #[cold]
    #[track_caller]
    pub fn invalid_format(code: u8, offset: usize) -> Self {
        Error::InvalidFormat(code, offset)
    }

    /// Creates a new [`Error::UnexpectedType`] from a string or static message.
    #[cold]
    #[track_caller]
    pub fn unexpected_type<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::UnexpectedType(s.into())
    }

    /// Creates a new [`Error::IntegerOverflow`] from a string or static message.
    #[cold]
    #[track_caller]
    pub fn integer_overflow<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::IntegerOverflow(s.into())
    }

    /// Creates a new [`Error::InvalidData`] from a string or static message.
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::InvalidData(s.into())
    }

    /// Creates a new [`Error::TruncatedMessage`].
    #[cold]
    #[track_caller]
    pub fn truncated_message() -> Self {
        Error::TruncatedMessage
    }

    /// Creates a new [`Error::TruncatedStream`] carrying the number of bytes
    /// that were buffered when the source closed.
    #[cold]
    #[track_caller]
    pub fn truncated_stream(buffered: usize) -> Self {
        Error::TruncatedStream(buffered)
    }

    /// Creates a new [`Error::ResolutionFailed`] naming the requested type
    /// and the resolver that was asked.
    #[cold]
    #[track_caller]
    pub fn resolution_failed(type_name: &'static str, resolver: &'static str) -> Self {
        Error::ResolutionFailed {
            type_name,
            resolver,
        }
    }

    /// Creates a new [`Error::DepthExceeded`].
    #[cold]
    #[track_caller]
    pub fn depth_exceeded(depth: u32) -> Self {
        Error::DepthExceeded(depth)
    }
}

/// Ensures a condition is true; otherwise returns the given [`enum@Error`].
///
/// # Examples
/// ```
/// use mopack_core::ensure;
/// use mopack_core::error::Error;
///
/// fn check_pair_count(n: u32) -> Result<(), Error> {
///     ensure!(n == 2, Error::unexpected_type("expected a two-element array"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with the given [`enum@Error`].
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($err)
    };
}
