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

//! The MessagePack format-code space.
//!
//! Every byte value 0..=255 maps to exactly one kind-and-size rule:
//!
//! | range       | meaning                         |
//! |-------------|---------------------------------|
//! | 0x00..=0x7f | positive fixint (value in code) |
//! | 0x80..=0x8f | fixmap (pair count in low bits) |
//! | 0x90..=0x9f | fixarray (count in low bits)    |
//! | 0xa0..=0xbf | fixstr (byte length in low bits)|
//! | 0xc0..=0xdf | the fixed [`Code`] block        |
//! | 0xe0..=0xff | negative fixint (-32..=-1)      |
//!
//! 0xc1 is the single code no encoding assigns; decoding it is a format
//! error. [`Format::of`] performs the classification and is total.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Largest value encodable as a positive fixint.
pub const POS_FIXINT_MAX: u8 = 0x7f;
/// Smallest value encodable as a negative fixint.
pub const NEG_FIXINT_MIN: i8 = -32;
/// Largest element count encodable in a fixmap/fixarray header.
pub const FIX_CONTAINER_MAX: u32 = 15;
/// Largest byte length encodable in a fixstr header.
pub const FIX_STR_MAX: usize = 31;

/// Leading-byte templates for the fix-size families; the low bits carry the
/// value or count.
pub const FIXMAP: u8 = 0x80;
pub const FIXARRAY: u8 = 0x90;
pub const FIXSTR: u8 = 0xa0;

/// The fixed format codes, 0xc0..=0xdf.
///
/// The fixint/fixmap/fixarray/fixstr families embed their payload in the
/// code byte and are not representable as enum members; [`Format::of`]
/// covers the whole byte space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Code {
    Nil = 0xc0,
    /// The one code the specification never assigns.
    NeverUsed = 0xc1,
    False = 0xc2,
    True = 0xc3,
    Bin8 = 0xc4,
    Bin16 = 0xc5,
    Bin32 = 0xc6,
    Ext8 = 0xc7,
    Ext16 = 0xc8,
    Ext32 = 0xc9,
    Float32 = 0xca,
    Float64 = 0xcb,
    Uint8 = 0xcc,
    Uint16 = 0xcd,
    Uint32 = 0xce,
    Uint64 = 0xcf,
    Int8 = 0xd0,
    Int16 = 0xd1,
    Int32 = 0xd2,
    Int64 = 0xd3,
    FixExt1 = 0xd4,
    FixExt2 = 0xd5,
    FixExt4 = 0xd6,
    FixExt8 = 0xd7,
    FixExt16 = 0xd8,
    Str8 = 0xd9,
    Str16 = 0xda,
    Str32 = 0xdb,
    Array16 = 0xdc,
    Array32 = 0xdd,
    Map16 = 0xde,
    Map32 = 0xdf,
}

/// Classification of a leading byte into its kind-and-size rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// 0x00..=0x7f, value embedded in the code.
    PositiveFixInt(u8),
    /// 0xe0..=0xff, value embedded in the code, -32..=-1.
    NegativeFixInt(i8),
    /// 0x80..=0x8f, pair count embedded in the code.
    FixMap(u8),
    /// 0x90..=0x9f, element count embedded in the code.
    FixArray(u8),
    /// 0xa0..=0xbf, byte length embedded in the code.
    FixStr(u8),
    /// One of the fixed codes 0xc0..=0xdf, including `Code::NeverUsed`.
    Fixed(Code),
}

impl Format {
    /// Classifies a leading byte. Total: every byte maps to exactly one rule.
    #[inline]
    pub fn of(code: u8) -> Format {
        match code {
            0x00..=0x7f => Format::PositiveFixInt(code),
            0x80..=0x8f => Format::FixMap(code & 0x0f),
            0x90..=0x9f => Format::FixArray(code & 0x0f),
            0xa0..=0xbf => Format::FixStr(code & 0x1f),
            0xe0..=0xff => Format::NegativeFixInt(code as i8),
            _ => match Code::try_from(code) {
                Ok(fixed) => Format::Fixed(fixed),
                // 0xc0..=0xdf is fully covered by Code.
                Err(_) => unreachable!(),
            },
        }
    }

    /// A short description of the kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Format::PositiveFixInt(_) | Format::NegativeFixInt(_) => "integer",
            Format::FixMap(_) => "map",
            Format::FixArray(_) => "array",
            Format::FixStr(_) => "string",
            Format::Fixed(code) => match code {
                Code::Nil => "nil",
                Code::NeverUsed => "never-used code",
                Code::False | Code::True => "boolean",
                Code::Bin8 | Code::Bin16 | Code::Bin32 => "binary",
                Code::Ext8 | Code::Ext16 | Code::Ext32 => "extension",
                Code::Float32 | Code::Float64 => "float",
                Code::Uint8 | Code::Uint16 | Code::Uint32 | Code::Uint64 => "integer",
                Code::Int8 | Code::Int16 | Code::Int32 | Code::Int64 => "integer",
                Code::FixExt1
                | Code::FixExt2
                | Code::FixExt4
                | Code::FixExt8
                | Code::FixExt16 => "extension",
                Code::Str8 | Code::Str16 | Code::Str32 => "string",
                Code::Array16 | Code::Array32 => "array",
                Code::Map16 | Code::Map32 => "map",
            },
        }
    }
}

/// Extension type codes pre-allocated for library-defined extensions.
///
/// User extensions must stay clear of these. Negative codes are reserved by
/// the MessagePack specification itself; the positive entries here mirror
/// the codes the wider ecosystem has claimed for cross-implementation
/// interop.
pub mod reserved_ext {
    /// The standard timestamp extension (spec-reserved).
    pub const TIMESTAMP: i8 = -1;
    /// Block-compressed payload wrapping an array of chunks.
    pub const COMPRESSED_BLOCK_ARRAY: i8 = 98;
    /// Block-compressed payload.
    pub const COMPRESSED_BLOCK: i8 = 99;
    /// Typeless object wrapper: payload carries its own type tag.
    pub const TYPELESS: i8 = 100;
}
