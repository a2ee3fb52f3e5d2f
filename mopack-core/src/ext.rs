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

//! The extension envelope: `(type code, payload)` pairs.
//!
//! No validation of type-code legality happens here; reserved-range policy
//! belongs to the codecs that use the envelope (see
//! [`crate::types::reserved_ext`]). The one library-defined extension with
//! wire behavior of its own is the standard timestamp (type code −1), whose
//! three layouts [`Timestamp`] implements.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::Error;
use crate::types::reserved_ext;

/// Tag and byte length of an extension payload. Does not own the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtHeader {
    pub type_code: i8,
    pub length: u32,
}

impl ExtHeader {
    pub fn new(type_code: i8, length: u32) -> ExtHeader {
        ExtHeader { type_code, length }
    }
}

/// An extension value: signed type code plus owned payload bytes.
///
/// The payload is a [`Bytes`], so cloning an `Ext` shares rather than
/// copies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ext {
    pub type_code: i8,
    pub data: Bytes,
}

impl Ext {
    pub fn new(type_code: i8, data: Bytes) -> Ext {
        Ext { type_code, data }
    }

    pub fn copy_from_slice(type_code: i8, data: &[u8]) -> Ext {
        Ext {
            type_code,
            data: Bytes::copy_from_slice(data),
        }
    }

    /// The header this value encodes with. Payloads are bounded by the
    /// ext32 limit at write time, so the cast is lossless in practice.
    pub fn header(&self) -> ExtHeader {
        debug_assert!(self.data.len() as u64 <= u32::MAX as u64);
        ExtHeader::new(self.type_code, self.data.len() as u32)
    }
}

/// The standard timestamp extension (type code −1): seconds since the Unix
/// epoch plus a nanosecond part in `0..1_000_000_000`.
///
/// Three wire layouts, chosen smallest-first exactly as the format
/// specifies: 4-byte seconds, 8-byte packed nanos/seconds, 12-byte
/// nanos + seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: u32) -> Result<Timestamp, Error> {
        if nanos >= 1_000_000_000 {
            return Err(Error::invalid_data(format!(
                "timestamp nanoseconds {nanos} out of range"
            )));
        }
        Ok(Timestamp { seconds, nanos })
    }

    pub fn from_seconds(seconds: i64) -> Timestamp {
        Timestamp { seconds, nanos: 0 }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Packs into the smallest of the three standard layouts.
    pub fn to_ext(&self) -> Ext {
        let mut payload = BytesMut::with_capacity(12);
        if self.seconds >= 0 && (self.seconds >> 34) == 0 {
            let packed = ((self.nanos as u64) << 34) | self.seconds as u64;
            if packed & 0xffff_ffff_0000_0000 == 0 {
                // timestamp32: nanos are zero and seconds fit 32 bits
                payload.put_u32(self.seconds as u32);
            } else {
                // timestamp64
                payload.put_u64(packed);
            }
        } else {
            // timestamp96
            payload.put_u32(self.nanos);
            payload.put_i64(self.seconds);
        }
        Ext::new(reserved_ext::TIMESTAMP, payload.freeze())
    }

    /// Unpacks any of the three standard layouts, keyed by payload length.
    pub fn from_ext(ext: &Ext) -> Result<Timestamp, Error> {
        if ext.type_code != reserved_ext::TIMESTAMP {
            return Err(Error::unexpected_type(format!(
                "expected timestamp extension ({}), found type code {}",
                reserved_ext::TIMESTAMP,
                ext.type_code
            )));
        }
        let mut payload = &ext.data[..];
        match payload.len() {
            4 => Ok(Timestamp {
                seconds: payload.get_u32() as i64,
                nanos: 0,
            }),
            8 => {
                let packed = payload.get_u64();
                Ok(Timestamp {
                    seconds: (packed & 0x3_ffff_ffff) as i64,
                    nanos: (packed >> 34) as u32,
                })
            }
            12 => {
                let nanos = payload.get_u32();
                let seconds = payload.get_i64();
                Timestamp::new(seconds, nanos)
            }
            len => Err(Error::invalid_data(format!(
                "timestamp payload of {len} bytes matches no standard layout"
            ))),
        }
    }
}
