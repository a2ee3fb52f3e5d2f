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

//! Incremental message reassembly over an async byte source.
//!
//! [`MessageReader`] buffers chunks from any [`AsyncRead`] and yields
//! complete top-level MessagePack values — or bare map/array headers —
//! without requiring a whole message to arrive at once. Short data never
//! surfaces as an error: it drives the internal fetch-and-retry loop. A
//! malformed leading byte fails immediately, without waiting for more
//! input.
//!
//! One reader instance serves one stream and is not internally
//! synchronized; share it between tasks only behind external
//! synchronization.

use bytes::{Buf, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::error::Error;
use crate::pool::{BufferPool, Rental};
use crate::wire::{self, Decoded};

/// Streaming reader yielding complete MessagePack messages.
///
/// The internal buffer is rented from a [`BufferPool`] and returned when
/// the reader is dropped.
pub struct MessageReader<S> {
    source: S,
    buffer: Rental<BytesMut>,
    /// End offset of the previously returned message within `buffer`;
    /// reclaimed before the next read.
    consumed: usize,
    fetch_size: usize,
    source_closed: bool,
}

impl<S: AsyncRead + Unpin> MessageReader<S> {
    /// Creates a reader buffering through the process-wide default pool.
    pub fn new(source: S) -> MessageReader<S> {
        MessageReader::with_pool(source, BufferPool::global())
    }

    /// Creates a reader buffering through the given pool.
    pub fn with_pool(source: S, pool: &BufferPool) -> MessageReader<S> {
        MessageReader {
            source,
            buffer: pool.rent(),
            consumed: 0,
            fetch_size: pool.segment_size(),
            source_closed: false,
        }
    }

    /// Reads the next complete top-level message.
    ///
    /// Returns `Ok(None)` when the source is exhausted with no partial
    /// message pending; a source that closes mid-message is a
    /// [`Error::TruncatedStream`].
    ///
    /// Cancel-safe: the only await point is the source fetch, and
    /// dropping the future leaves the buffered state unchanged.
    pub async fn next_message(&mut self) -> Result<Option<Bytes>, Error> {
        self.reclaim();
        loop {
            match wire::try_skip_value(&self.buffer)? {
                Decoded::Value((), size) => {
                    debug!(len = size, "framed complete message");
                    self.consumed = size;
                    return Ok(Some(Bytes::copy_from_slice(&self.buffer[..size])));
                }
                Decoded::Partial => {
                    if !self.fetch().await? {
                        if self.buffer.is_empty() {
                            return Ok(None);
                        }
                        return Err(Error::truncated_stream(self.buffer.len()));
                    }
                }
            }
        }
    }

    /// Reads an array header, leaving the reader positioned at the first
    /// element; the caller consumes exactly that many subsequent values
    /// through this same reader.
    pub async fn read_array_header(&mut self) -> Result<u32, Error> {
        self.reclaim();
        loop {
            match wire::try_read_array_header(&self.buffer)? {
                Decoded::Value(count, size) => {
                    self.consumed = size;
                    return Ok(count);
                }
                Decoded::Partial => self.fetch_or_truncated().await?,
            }
        }
    }

    /// Reads a map header (pair count), leaving the reader positioned at
    /// the first key; the caller consumes exactly `2 * count` subsequent
    /// values through this same reader.
    pub async fn read_map_header(&mut self) -> Result<u32, Error> {
        self.reclaim();
        loop {
            match wire::try_read_map_header(&self.buffer)? {
                Decoded::Value(count, size) => {
                    self.consumed = size;
                    return Ok(count);
                }
                Decoded::Partial => self.fetch_or_truncated().await?,
            }
        }
    }

    /// Bytes received but not consumed as message data — for protocols
    /// that append non-MessagePack trailing data on the same stream.
    pub fn remaining_bytes(&self) -> &[u8] {
        &self.buffer[self.consumed..]
    }

    /// Discards the bytes of the previously returned message.
    fn reclaim(&mut self) {
        if self.consumed > 0 {
            self.buffer.advance(self.consumed);
            self.consumed = 0;
        }
    }

    /// Pulls one chunk from the source. Returns `false` on end of source.
    async fn fetch(&mut self) -> Result<bool, Error> {
        if self.source_closed {
            return Ok(false);
        }
        self.buffer.reserve(self.fetch_size);
        let n = self.source.read_buf(&mut *self.buffer).await?;
        if n == 0 {
            debug!(buffered = self.buffer.len(), "byte source closed");
            self.source_closed = true;
            return Ok(false);
        }
        trace!(bytes = n, "fetched chunk");
        Ok(true)
    }

    /// Fetch variant for header reads, where end-of-source always means a
    /// truncated value: the caller asked for a header, so "no more data"
    /// cannot be a clean end.
    async fn fetch_or_truncated(&mut self) -> Result<(), Error> {
        if self.fetch().await? {
            return Ok(());
        }
        Err(Error::truncated_stream(self.buffer.len()))
    }
}
