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

//! Byte-level buffer management.
//!
//! [`Writer`] is a growable output buffer; [`Reader`] is a checked cursor
//! over a fully-resident message. All multi-byte fields are big-endian on
//! the wire regardless of host byte order.
//!
//! The wire-format framing itself (format codes, length ladders) lives in
//! [`crate::wire`]; this module only moves raw integers and byte runs.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::error::Error;

/// Growable output buffer with big-endian multi-byte writes.
///
/// `reset` keeps the allocation, so pooled writers serve repeated encodes
/// without reallocating.
#[derive(Default)]
pub struct Writer {
    pub(crate) bf: Vec<u8>,
    reserved: usize,
}

impl Writer {
    /// Resets logical length to zero, keeping capacity.
    pub fn reset(&mut self) {
        self.bf.clear();
        self.reserved = 0;
    }

    /// Copies the written bytes out.
    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bf
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.reserved += additional;
        if self.bf.capacity() < self.reserved {
            self.bf.reserve(self.reserved);
        }
    }

    /// Appends `len` zero bytes, returning the offset of the first; used to
    /// leave room for a header patched later via [`Writer::set_bytes`].
    pub fn skip(&mut self, len: usize) -> usize {
        let offset = self.bf.len();
        self.bf.resize(offset + len, 0);
        offset
    }

    /// Overwrites previously written bytes at `offset`.
    ///
    /// Panics if the range was never written; callers pair this with
    /// [`Writer::skip`].
    pub fn set_bytes(&mut self, offset: usize, data: &[u8]) {
        self.bf[offset..offset + data.len()].copy_from_slice(data);
    }

    pub fn write_bytes(&mut self, v: &[u8]) {
        self.bf.extend_from_slice(v);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        // Vec<u8> as io::Write cannot fail.
        let _ = self.bf.write_u16::<BigEndian>(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        let _ = self.bf.write_i16::<BigEndian>(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        let _ = self.bf.write_u32::<BigEndian>(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        let _ = self.bf.write_i32::<BigEndian>(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        let _ = self.bf.write_u64::<BigEndian>(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        let _ = self.bf.write_i64::<BigEndian>(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        let _ = self.bf.write_f32::<BigEndian>(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        let _ = self.bf.write_f64::<BigEndian>(value);
    }
}

/// Checked cursor over a fully-resident encoded message.
///
/// Short reads surface as [`Error::TruncatedMessage`]: unlike the streaming
/// reader, no further bytes can arrive here.
pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bf[self.cursor..]
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.bf.len()
    }

    /// Advances the cursor by `n` consumed bytes.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.cursor + n <= self.bf.len());
        self.cursor += n;
    }

    /// The next leading byte, without consuming it.
    pub fn peek_u8(&self) -> Result<u8, Error> {
        self.bf
            .get(self.cursor)
            .copied()
            .ok_or_else(Error::truncated_message)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let v = self.peek_u8()?;
        self.cursor += 1;
        Ok(v)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self
            .cursor
            .checked_add(len)
            .ok_or_else(Error::truncated_message)?;
        let s = self
            .bf
            .get(self.cursor..end)
            .ok_or_else(Error::truncated_message)?;
        self.cursor = end;
        Ok(s)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(BigEndian::read_u64(self.read_bytes(8)?))
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(BigEndian::read_f32(self.read_bytes(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(BigEndian::read_f64(self.read_bytes(8)?))
    }
}
