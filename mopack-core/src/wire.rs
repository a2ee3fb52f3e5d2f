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

//! The MessagePack wire primitives.
//!
//! Two function families:
//!
//! - `try_read_*(buf)` decode one value (or header) from the front of a
//!   byte slice. They are stateless and total over their input: a complete
//!   encoding yields [`Decoded::Value`] with the consumed byte count, a
//!   buffer that ends too early yields [`Decoded::Partial`] with nothing
//!   consumed, and a wrong or unassigned leading byte is an error right
//!   away — insufficient data is never confused with malformed data.
//! - `write_*(writer, ..)` append the canonical encoding, choosing the
//!   smallest wire form for the magnitude. The `write_fixed_*` variants
//!   always emit the full-width form for callers that need schema-stable
//!   layouts.
//!
//! The `read_*` adapters at the bottom run the `try_read_*` routines
//! against a [`Reader`] cursor and convert [`Decoded::Partial`] into
//! [`Error::TruncatedMessage`]; formatters use those, since by the time a
//! formatter runs the message is fully resident.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::ext::{Ext, ExtHeader};
use crate::types::{
    Code, Format, FIXARRAY, FIXMAP, FIXSTR, FIX_CONTAINER_MAX, FIX_STR_MAX, NEG_FIXINT_MIN,
    POS_FIXINT_MAX,
};

/// Outcome of a non-blocking decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded<T> {
    /// A complete value was present; the `usize` is the number of bytes it
    /// occupies at the front of the input.
    Value(T, usize),
    /// The input ends before the value does. Nothing was consumed; supply
    /// more bytes and retry from the same offset.
    Partial,
}

/// Result of a `try_read_*` primitive.
pub type DecodeResult<T> = Result<Decoded<T>, Error>;

/// Evaluates to the value of an `Option`, returning `Decoded::Partial`
/// from the surrounding function when the bytes are not there yet.
macro_rules! need {
    ($opt:expr) => {
        match $opt {
            Some(v) => v,
            None => return Ok(Decoded::Partial),
        }
    };
}

#[inline]
fn be_uint(buf: &[u8], at: usize, width: usize) -> Option<u64> {
    let run = buf.get(at..at + width)?;
    let mut v = 0u64;
    for &b in run {
        v = (v << 8) | b as u64;
    }
    Some(v)
}

#[inline]
fn be_int(buf: &[u8], at: usize, width: usize) -> Option<i64> {
    let v = be_uint(buf, at, width)?;
    let shift = 64 - 8 * width as u32;
    Some(((v << shift) as i64) >> shift)
}

#[cold]
fn wrong_kind(expected: &'static str, code: u8) -> Error {
    if code == u8::from(Code::NeverUsed) {
        return Error::invalid_format(code, 0);
    }
    Error::unexpected_type(format!(
        "expected {expected}, found {} (code 0x{code:02x})",
        Format::of(code).kind_name()
    ))
}

// ---------------------------------------------------------------------------
// try_read_*: stateless decode against a byte slice
// ---------------------------------------------------------------------------

pub fn try_read_nil(buf: &[u8]) -> DecodeResult<()> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::Fixed(Code::Nil) => Ok(Decoded::Value((), 1)),
        _ => Err(wrong_kind("nil", code)),
    }
}

pub fn try_read_bool(buf: &[u8]) -> DecodeResult<bool> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::Fixed(Code::False) => Ok(Decoded::Value(false, 1)),
        Format::Fixed(Code::True) => Ok(Decoded::Value(true, 1)),
        _ => Err(wrong_kind("boolean", code)),
    }
}

/// Reads any integer form as `u64`. Signed forms are accepted when the
/// value is non-negative; otherwise the read fails with an overflow error.
pub fn try_read_uint(buf: &[u8]) -> DecodeResult<u64> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::PositiveFixInt(v) => Ok(Decoded::Value(v as u64, 1)),
        Format::NegativeFixInt(v) => Err(Error::integer_overflow(format!(
            "cannot read negative value {v} as unsigned"
        ))),
        Format::Fixed(Code::Uint8) => Ok(Decoded::Value(need!(be_uint(buf, 1, 1)), 2)),
        Format::Fixed(Code::Uint16) => Ok(Decoded::Value(need!(be_uint(buf, 1, 2)), 3)),
        Format::Fixed(Code::Uint32) => Ok(Decoded::Value(need!(be_uint(buf, 1, 4)), 5)),
        Format::Fixed(Code::Uint64) => Ok(Decoded::Value(need!(be_uint(buf, 1, 8)), 9)),
        Format::Fixed(Code::Int8) | Format::Fixed(Code::Int16) | Format::Fixed(Code::Int32)
        | Format::Fixed(Code::Int64) => {
            let width = match Format::of(code) {
                Format::Fixed(Code::Int8) => 1,
                Format::Fixed(Code::Int16) => 2,
                Format::Fixed(Code::Int32) => 4,
                _ => 8,
            };
            let v = need!(be_int(buf, 1, width));
            if v < 0 {
                return Err(Error::integer_overflow(format!(
                    "cannot read negative value {v} as unsigned"
                )));
            }
            Ok(Decoded::Value(v as u64, 1 + width))
        }
        _ => Err(wrong_kind("integer", code)),
    }
}

/// Reads any integer form as `i64`. Unsigned forms are accepted when the
/// value fits; a `uint64` above `i64::MAX` fails with an overflow error.
pub fn try_read_int(buf: &[u8]) -> DecodeResult<i64> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::PositiveFixInt(v) => Ok(Decoded::Value(v as i64, 1)),
        Format::NegativeFixInt(v) => Ok(Decoded::Value(v as i64, 1)),
        Format::Fixed(Code::Uint8) => Ok(Decoded::Value(need!(be_uint(buf, 1, 1)) as i64, 2)),
        Format::Fixed(Code::Uint16) => Ok(Decoded::Value(need!(be_uint(buf, 1, 2)) as i64, 3)),
        Format::Fixed(Code::Uint32) => Ok(Decoded::Value(need!(be_uint(buf, 1, 4)) as i64, 5)),
        Format::Fixed(Code::Uint64) => {
            let v = need!(be_uint(buf, 1, 8));
            if v > i64::MAX as u64 {
                return Err(Error::integer_overflow(format!(
                    "unsigned value {v} does not fit a signed 64-bit integer"
                )));
            }
            Ok(Decoded::Value(v as i64, 9))
        }
        Format::Fixed(Code::Int8) => Ok(Decoded::Value(need!(be_int(buf, 1, 1)), 2)),
        Format::Fixed(Code::Int16) => Ok(Decoded::Value(need!(be_int(buf, 1, 2)), 3)),
        Format::Fixed(Code::Int32) => Ok(Decoded::Value(need!(be_int(buf, 1, 4)), 5)),
        Format::Fixed(Code::Int64) => Ok(Decoded::Value(need!(be_int(buf, 1, 8)), 9)),
        _ => Err(wrong_kind("integer", code)),
    }
}

/// Reads a float32. Accepts float64 (narrowing) and any integer form, the
/// way the numeric readers of other MessagePack implementations do.
pub fn try_read_f32(buf: &[u8]) -> DecodeResult<f32> {
    match try_read_f64(buf)? {
        Decoded::Value(v, n) => Ok(Decoded::Value(v as f32, n)),
        Decoded::Partial => Ok(Decoded::Partial),
    }
}

/// Reads a float64. Accepts float32 (widening) and any integer form.
pub fn try_read_f64(buf: &[u8]) -> DecodeResult<f64> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::Fixed(Code::Float64) => {
            let bits = need!(be_uint(buf, 1, 8));
            Ok(Decoded::Value(f64::from_bits(bits), 9))
        }
        Format::Fixed(Code::Float32) => {
            let bits = need!(be_uint(buf, 1, 4)) as u32;
            Ok(Decoded::Value(f32::from_bits(bits) as f64, 5))
        }
        Format::PositiveFixInt(_)
        | Format::NegativeFixInt(_)
        | Format::Fixed(Code::Int8)
        | Format::Fixed(Code::Int16)
        | Format::Fixed(Code::Int32)
        | Format::Fixed(Code::Int64) => match try_read_int(buf)? {
            Decoded::Value(v, n) => Ok(Decoded::Value(v as f64, n)),
            Decoded::Partial => Ok(Decoded::Partial),
        },
        Format::Fixed(Code::Uint8)
        | Format::Fixed(Code::Uint16)
        | Format::Fixed(Code::Uint32)
        | Format::Fixed(Code::Uint64) => match try_read_uint(buf)? {
            Decoded::Value(v, n) => Ok(Decoded::Value(v as f64, n)),
            Decoded::Partial => Ok(Decoded::Partial),
        },
        _ => Err(wrong_kind("float", code)),
    }
}

#[inline]
fn slice_payload(buf: &[u8], header: usize, len: u64) -> DecodeResult<&[u8]> {
    let len = usize::try_from(len)
        .map_err(|_| Error::integer_overflow("payload length exceeds the address space"))?;
    let end = header
        .checked_add(len)
        .ok_or_else(|| Error::integer_overflow("payload length exceeds the address space"))?;
    match buf.get(header..end) {
        Some(p) => Ok(Decoded::Value(p, end)),
        None => Ok(Decoded::Partial),
    }
}

/// Reads a str payload without UTF-8 validation.
pub fn try_read_str_bytes(buf: &[u8]) -> DecodeResult<&[u8]> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::FixStr(n) => slice_payload(buf, 1, n as u64),
        Format::Fixed(Code::Str8) => slice_payload(buf, 2, need!(be_uint(buf, 1, 1))),
        Format::Fixed(Code::Str16) => slice_payload(buf, 3, need!(be_uint(buf, 1, 2))),
        Format::Fixed(Code::Str32) => slice_payload(buf, 5, need!(be_uint(buf, 1, 4))),
        _ => Err(wrong_kind("string", code)),
    }
}

pub fn try_read_str(buf: &[u8]) -> DecodeResult<&str> {
    match try_read_str_bytes(buf)? {
        Decoded::Value(b, n) => Ok(Decoded::Value(std::str::from_utf8(b)?, n)),
        Decoded::Partial => Ok(Decoded::Partial),
    }
}

pub fn try_read_bin(buf: &[u8]) -> DecodeResult<&[u8]> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::Fixed(Code::Bin8) => slice_payload(buf, 2, need!(be_uint(buf, 1, 1))),
        Format::Fixed(Code::Bin16) => slice_payload(buf, 3, need!(be_uint(buf, 1, 2))),
        Format::Fixed(Code::Bin32) => slice_payload(buf, 5, need!(be_uint(buf, 1, 4))),
        _ => Err(wrong_kind("binary", code)),
    }
}

/// Reads an array header, leaving the elements for the caller.
pub fn try_read_array_header(buf: &[u8]) -> DecodeResult<u32> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::FixArray(n) => Ok(Decoded::Value(n as u32, 1)),
        Format::Fixed(Code::Array16) => Ok(Decoded::Value(need!(be_uint(buf, 1, 2)) as u32, 3)),
        Format::Fixed(Code::Array32) => Ok(Decoded::Value(need!(be_uint(buf, 1, 4)) as u32, 5)),
        _ => Err(wrong_kind("array", code)),
    }
}

/// Reads a map header (pair count), leaving the entries for the caller.
pub fn try_read_map_header(buf: &[u8]) -> DecodeResult<u32> {
    let code = *need!(buf.first());
    match Format::of(code) {
        Format::FixMap(n) => Ok(Decoded::Value(n as u32, 1)),
        Format::Fixed(Code::Map16) => Ok(Decoded::Value(need!(be_uint(buf, 1, 2)) as u32, 3)),
        Format::Fixed(Code::Map32) => Ok(Decoded::Value(need!(be_uint(buf, 1, 4)) as u32, 5)),
        _ => Err(wrong_kind("map", code)),
    }
}

pub fn try_read_ext_header(buf: &[u8]) -> DecodeResult<ExtHeader> {
    let code = *need!(buf.first());
    let fixed = |len: u32, buf: &[u8]| -> DecodeResult<ExtHeader> {
        let type_code = *need!(buf.get(1)) as i8;
        Ok(Decoded::Value(ExtHeader::new(type_code, len), 2))
    };
    match Format::of(code) {
        Format::Fixed(Code::FixExt1) => fixed(1, buf),
        Format::Fixed(Code::FixExt2) => fixed(2, buf),
        Format::Fixed(Code::FixExt4) => fixed(4, buf),
        Format::Fixed(Code::FixExt8) => fixed(8, buf),
        Format::Fixed(Code::FixExt16) => fixed(16, buf),
        Format::Fixed(Code::Ext8) => {
            let len = need!(be_uint(buf, 1, 1)) as u32;
            let type_code = *need!(buf.get(2)) as i8;
            Ok(Decoded::Value(ExtHeader::new(type_code, len), 3))
        }
        Format::Fixed(Code::Ext16) => {
            let len = need!(be_uint(buf, 1, 2)) as u32;
            let type_code = *need!(buf.get(3)) as i8;
            Ok(Decoded::Value(ExtHeader::new(type_code, len), 4))
        }
        Format::Fixed(Code::Ext32) => {
            let len = need!(be_uint(buf, 1, 4)) as u32;
            let type_code = *need!(buf.get(5)) as i8;
            Ok(Decoded::Value(ExtHeader::new(type_code, len), 6))
        }
        _ => Err(wrong_kind("extension", code)),
    }
}

pub fn try_read_ext(buf: &[u8]) -> DecodeResult<Ext> {
    let (header, header_len) = match try_read_ext_header(buf)? {
        Decoded::Value(h, n) => (h, n),
        Decoded::Partial => return Ok(Decoded::Partial),
    };
    match slice_payload(buf, header_len, header.length as u64)? {
        Decoded::Value(payload, end) => Ok(Decoded::Value(
            Ext::copy_from_slice(header.type_code, payload),
            end,
        )),
        Decoded::Partial => Ok(Decoded::Partial),
    }
}

/// Locates the end of one complete top-level value, nested elements
/// included.
///
/// The traversal is iterative: a counter of values still owed, fed by
/// array/map headers as they are encountered. A header may promise any
/// number of children, but each loop iteration consumes at least one real
/// input byte, so adversarial headers run into `Partial`, not a spin.
pub fn try_skip_value(buf: &[u8]) -> DecodeResult<()> {
    let total = buf.len() as u64;
    let mut offset: u64 = 0;
    let mut pending: u64 = 1;
    while pending > 0 {
        if offset >= total {
            return Ok(Decoded::Partial);
        }
        let at = offset as usize;
        let code = buf[at];
        // (bytes after the code byte, payload bytes, child values)
        let (header, payload, children): (u64, u64, u64) = match Format::of(code) {
            Format::PositiveFixInt(_) | Format::NegativeFixInt(_) => (0, 0, 0),
            Format::FixMap(n) => (0, 0, 2 * n as u64),
            Format::FixArray(n) => (0, 0, n as u64),
            Format::FixStr(n) => (0, n as u64, 0),
            Format::Fixed(fixed) => match fixed {
                Code::Nil | Code::False | Code::True => (0, 0, 0),
                Code::NeverUsed => return Err(Error::invalid_format(code, at)),
                Code::Uint8 | Code::Int8 => (0, 1, 0),
                Code::Uint16 | Code::Int16 => (0, 2, 0),
                Code::Uint32 | Code::Int32 | Code::Float32 => (0, 4, 0),
                Code::Uint64 | Code::Int64 | Code::Float64 => (0, 8, 0),
                Code::FixExt1 => (1, 1, 0),
                Code::FixExt2 => (1, 2, 0),
                Code::FixExt4 => (1, 4, 0),
                Code::FixExt8 => (1, 8, 0),
                Code::FixExt16 => (1, 16, 0),
                Code::Bin8 | Code::Str8 => (1, need!(be_uint(buf, at + 1, 1)), 0),
                Code::Bin16 | Code::Str16 => (2, need!(be_uint(buf, at + 1, 2)), 0),
                Code::Bin32 | Code::Str32 => (4, need!(be_uint(buf, at + 1, 4)), 0),
                Code::Ext8 => (2, need!(be_uint(buf, at + 1, 1)), 0),
                Code::Ext16 => (3, need!(be_uint(buf, at + 1, 2)), 0),
                Code::Ext32 => (5, need!(be_uint(buf, at + 1, 4)), 0),
                Code::Array16 => (2, 0, need!(be_uint(buf, at + 1, 2))),
                Code::Array32 => (4, 0, need!(be_uint(buf, at + 1, 4))),
                Code::Map16 => (2, 0, 2 * need!(be_uint(buf, at + 1, 2))),
                Code::Map32 => (4, 0, 2 * need!(be_uint(buf, at + 1, 4))),
            },
        };
        let end = offset + 1 + header + payload;
        if end > total {
            return Ok(Decoded::Partial);
        }
        offset = end;
        pending = pending - 1 + children;
    }
    Ok(Decoded::Value((), offset as usize))
}

// ---------------------------------------------------------------------------
// write_*: append the canonical encoding to a Writer
// ---------------------------------------------------------------------------

pub fn write_nil(writer: &mut Writer) {
    writer.write_u8(Code::Nil.into());
}

pub fn write_bool(writer: &mut Writer, value: bool) {
    writer.write_u8(if value { Code::True } else { Code::False }.into());
}

/// Writes an unsigned integer in the smallest wire form for its magnitude.
pub fn write_uint(writer: &mut Writer, value: u64) {
    if value <= POS_FIXINT_MAX as u64 {
        writer.write_u8(value as u8);
    } else if value <= u8::MAX as u64 {
        writer.write_u8(Code::Uint8.into());
        writer.write_u8(value as u8);
    } else if value <= u16::MAX as u64 {
        writer.write_u8(Code::Uint16.into());
        writer.write_u16(value as u16);
    } else if value <= u32::MAX as u64 {
        writer.write_u8(Code::Uint32.into());
        writer.write_u32(value as u32);
    } else {
        writer.write_u8(Code::Uint64.into());
        writer.write_u64(value);
    }
}

/// Writes a signed integer in the smallest wire form for its magnitude.
/// Non-negative values take the unsigned ladder, negative values the
/// negative-fixint and int8..int64 ladder.
pub fn write_int(writer: &mut Writer, value: i64) {
    if value >= 0 {
        write_uint(writer, value as u64);
    } else if value >= NEG_FIXINT_MIN as i64 {
        writer.write_i8(value as i8);
    } else if value >= i8::MIN as i64 {
        writer.write_u8(Code::Int8.into());
        writer.write_i8(value as i8);
    } else if value >= i16::MIN as i64 {
        writer.write_u8(Code::Int16.into());
        writer.write_i16(value as i16);
    } else if value >= i32::MIN as i64 {
        writer.write_u8(Code::Int32.into());
        writer.write_i32(value as i32);
    } else {
        writer.write_u8(Code::Int64.into());
        writer.write_i64(value);
    }
}

pub fn write_f32(writer: &mut Writer, value: f32) {
    writer.write_u8(Code::Float32.into());
    writer.write_f32(value);
}

pub fn write_f64(writer: &mut Writer, value: f64) {
    writer.write_u8(Code::Float64.into());
    writer.write_f64(value);
}

macro_rules! write_fixed {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $code:expr, $method:ident) => {
        $(#[$doc])*
        pub fn $name(writer: &mut Writer, value: $ty) {
            writer.write_u8($code.into());
            writer.$method(value);
        }
    };
}

write_fixed!(
    /// Always emits the uint8 form, regardless of magnitude.
    write_fixed_u8, u8, Code::Uint8, write_u8
);
write_fixed!(write_fixed_u16, u16, Code::Uint16, write_u16);
write_fixed!(write_fixed_u32, u32, Code::Uint32, write_u32);
write_fixed!(write_fixed_u64, u64, Code::Uint64, write_u64);
write_fixed!(
    /// Always emits the int8 form, regardless of magnitude.
    write_fixed_i8, i8, Code::Int8, write_i8
);
write_fixed!(write_fixed_i16, i16, Code::Int16, write_i16);
write_fixed!(write_fixed_i32, i32, Code::Int32, write_i32);
write_fixed!(write_fixed_i64, i64, Code::Int64, write_i64);

/// Writes a UTF-8 string. Fails only when the byte length exceeds the
/// str32 limit.
pub fn write_str(writer: &mut Writer, value: &str) -> Result<(), Error> {
    let bytes = value.as_bytes();
    let len = bytes.len();
    if len <= FIX_STR_MAX {
        writer.write_u8(FIXSTR | len as u8);
    } else if len <= u8::MAX as usize {
        writer.write_u8(Code::Str8.into());
        writer.write_u8(len as u8);
    } else if len <= u16::MAX as usize {
        writer.write_u8(Code::Str16.into());
        writer.write_u16(len as u16);
    } else if len as u64 <= u32::MAX as u64 {
        writer.write_u8(Code::Str32.into());
        writer.write_u32(len as u32);
    } else {
        return Err(Error::integer_overflow(format!(
            "string of {len} bytes exceeds the str32 limit"
        )));
    }
    writer.write_bytes(bytes);
    Ok(())
}

/// Writes a binary blob. Fails only when the length exceeds the bin32
/// limit.
pub fn write_bin(writer: &mut Writer, value: &[u8]) -> Result<(), Error> {
    let len = value.len();
    if len <= u8::MAX as usize {
        writer.write_u8(Code::Bin8.into());
        writer.write_u8(len as u8);
    } else if len <= u16::MAX as usize {
        writer.write_u8(Code::Bin16.into());
        writer.write_u16(len as u16);
    } else if len as u64 <= u32::MAX as u64 {
        writer.write_u8(Code::Bin32.into());
        writer.write_u32(len as u32);
    } else {
        return Err(Error::integer_overflow(format!(
            "binary of {len} bytes exceeds the bin32 limit"
        )));
    }
    writer.write_bytes(value);
    Ok(())
}

/// Writes an array header; the caller writes `count` elements afterwards.
pub fn write_array_header(writer: &mut Writer, count: u32) {
    if count <= FIX_CONTAINER_MAX {
        writer.write_u8(FIXARRAY | count as u8);
    } else if count <= u16::MAX as u32 {
        writer.write_u8(Code::Array16.into());
        writer.write_u16(count as u16);
    } else {
        writer.write_u8(Code::Array32.into());
        writer.write_u32(count);
    }
}

/// Writes a map header; the caller writes `count` key-value pairs
/// afterwards.
pub fn write_map_header(writer: &mut Writer, count: u32) {
    if count <= FIX_CONTAINER_MAX {
        writer.write_u8(FIXMAP | count as u8);
    } else if count <= u16::MAX as u32 {
        writer.write_u8(Code::Map16.into());
        writer.write_u16(count as u16);
    } else {
        writer.write_u8(Code::Map32.into());
        writer.write_u32(count);
    }
}

/// Writes an extension header: the fixext form when the payload length is
/// exactly 1, 2, 4, 8 or 16, else the explicit-length form. The caller
/// writes `header.length` payload bytes afterwards.
pub fn write_ext_header(writer: &mut Writer, header: ExtHeader) {
    match header.length {
        1 => writer.write_u8(Code::FixExt1.into()),
        2 => writer.write_u8(Code::FixExt2.into()),
        4 => writer.write_u8(Code::FixExt4.into()),
        8 => writer.write_u8(Code::FixExt8.into()),
        16 => writer.write_u8(Code::FixExt16.into()),
        len if len <= u8::MAX as u32 => {
            writer.write_u8(Code::Ext8.into());
            writer.write_u8(len as u8);
        }
        len if len <= u16::MAX as u32 => {
            writer.write_u8(Code::Ext16.into());
            writer.write_u16(len as u16);
        }
        len => {
            writer.write_u8(Code::Ext32.into());
            writer.write_u32(len);
        }
    }
    writer.write_i8(header.type_code);
}

pub fn write_ext(writer: &mut Writer, value: &Ext) -> Result<(), Error> {
    let len = u32::try_from(value.data.len()).map_err(|_| {
        Error::integer_overflow(format!(
            "extension payload of {} bytes exceeds the ext32 limit",
            value.data.len()
        ))
    })?;
    write_ext_header(writer, ExtHeader::new(value.type_code, len));
    writer.write_bytes(&value.data);
    Ok(())
}

// ---------------------------------------------------------------------------
// read_*: Reader adapters for fully-resident messages
// ---------------------------------------------------------------------------

macro_rules! reader_adapter {
    ($(#[$doc:meta])* $name:ident, $try_fn:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(reader: &mut Reader<'_>) -> Result<$ty, Error> {
            match $try_fn(reader.remaining())? {
                Decoded::Value(v, n) => {
                    reader.advance(n);
                    Ok(v)
                }
                Decoded::Partial => Err(Error::truncated_message()),
            }
        }
    };
}

reader_adapter!(read_nil, try_read_nil, ());
reader_adapter!(read_bool, try_read_bool, bool);
reader_adapter!(read_uint, try_read_uint, u64);
reader_adapter!(read_int, try_read_int, i64);
reader_adapter!(read_f32, try_read_f32, f32);
reader_adapter!(read_f64, try_read_f64, f64);
reader_adapter!(read_array_header, try_read_array_header, u32);
reader_adapter!(read_map_header, try_read_map_header, u32);
reader_adapter!(read_ext_header, try_read_ext_header, ExtHeader);
reader_adapter!(read_ext, try_read_ext, Ext);

pub fn read_str<'a>(reader: &mut Reader<'a>) -> Result<&'a str, Error> {
    match try_read_str(reader.remaining())? {
        Decoded::Value(v, n) => {
            reader.advance(n);
            Ok(v)
        }
        Decoded::Partial => Err(Error::truncated_message()),
    }
}

pub fn read_str_bytes<'a>(reader: &mut Reader<'a>) -> Result<&'a [u8], Error> {
    match try_read_str_bytes(reader.remaining())? {
        Decoded::Value(v, n) => {
            reader.advance(n);
            Ok(v)
        }
        Decoded::Partial => Err(Error::truncated_message()),
    }
}

pub fn read_bin<'a>(reader: &mut Reader<'a>) -> Result<&'a [u8], Error> {
    match try_read_bin(reader.remaining())? {
        Decoded::Value(v, n) => {
            reader.advance(n);
            Ok(v)
        }
        Decoded::Partial => Err(Error::truncated_message()),
    }
}

/// Skips one complete value, returning the number of bytes it occupied.
pub fn skip_value(reader: &mut Reader<'_>) -> Result<usize, Error> {
    match try_skip_value(reader.remaining())? {
        Decoded::Value((), n) => {
            reader.advance(n);
            Ok(n)
        }
        Decoded::Partial => Err(Error::truncated_message()),
    }
}

/// Whether the next value is nil, without consuming anything.
pub fn peek_is_nil(reader: &Reader<'_>) -> Result<bool, Error> {
    Ok(reader.peek_u8()? == u8::from(Code::Nil))
}
