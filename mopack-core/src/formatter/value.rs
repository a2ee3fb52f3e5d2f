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

//! The dynamic value tree: decode anything, inspect it, write it back.
//!
//! This is the typeless fallback representation — what a caller gets when
//! the concrete type of a message is unknown until runtime. Map entries
//! are kept as a pair list rather than a hash map because MessagePack map
//! keys may themselves be arrays, maps or floats.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::ext::Ext;
use crate::formatter::Formatter;
use crate::types::{Code, Format};
use crate::wire;

/// Decoder recursion limit for untrusted input.
const MAX_NESTING: u32 = 128;

/// Any MessagePack value.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    /// Signed-form integers and both fixint ranges.
    Int(i64),
    /// Unsigned-form integers.
    UInt(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    /// Key-value pairs in wire order.
    Map(Vec<(Value, Value)>),
    Ext(Ext),
}

/// Equality is by numeric value across the `Int`/`UInt` divide: the wire
/// form of a non-negative integer depends only on magnitude, so `Int(5)`
/// and `UInt(5)` are the same value.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Int(a), UInt(b)) | (UInt(b), Int(a)) => *a >= 0 && *a as u64 == *b,
            (F32(a), F32(b)) => a == b,
            (F64(a), F64(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Bin(a), Bin(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Ext(a), Ext(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

/// Formatter producing and consuming [`Value`] trees.
pub struct ValueFormatter;

fn write_value(writer: &mut Writer, value: &Value) -> Result<(), Error> {
    match value {
        Value::Nil => wire::write_nil(writer),
        Value::Bool(v) => wire::write_bool(writer, *v),
        Value::Int(v) => wire::write_int(writer, *v),
        Value::UInt(v) => wire::write_uint(writer, *v),
        Value::F32(v) => wire::write_f32(writer, *v),
        Value::F64(v) => wire::write_f64(writer, *v),
        Value::Str(v) => wire::write_str(writer, v)?,
        Value::Bin(v) => wire::write_bin(writer, v)?,
        Value::Array(elements) => {
            let count = u32::try_from(elements.len()).map_err(|_| {
                Error::integer_overflow("array exceeds the array32 limit")
            })?;
            wire::write_array_header(writer, count);
            for element in elements {
                write_value(writer, element)?;
            }
        }
        Value::Map(pairs) => {
            let count = u32::try_from(pairs.len())
                .map_err(|_| Error::integer_overflow("map exceeds the map32 limit"))?;
            wire::write_map_header(writer, count);
            for (k, v) in pairs {
                write_value(writer, k)?;
                write_value(writer, v)?;
            }
        }
        Value::Ext(v) => wire::write_ext(writer, v)?,
    }
    Ok(())
}

fn read_value(reader: &mut Reader<'_>, depth: u32) -> Result<Value, Error> {
    if depth >= MAX_NESTING {
        return Err(Error::depth_exceeded(depth));
    }
    let code = reader.peek_u8()?;
    let value = match Format::of(code) {
        Format::PositiveFixInt(_) | Format::NegativeFixInt(_) => {
            Value::Int(wire::read_int(reader)?)
        }
        Format::FixStr(_) => Value::Str(wire::read_str(reader)?.to_owned()),
        Format::FixArray(_) => return read_array(reader, depth),
        Format::FixMap(_) => return read_map(reader, depth),
        Format::Fixed(fixed) => match fixed {
            Code::Nil => {
                wire::read_nil(reader)?;
                Value::Nil
            }
            Code::NeverUsed => return Err(Error::invalid_format(code, reader.cursor())),
            Code::False | Code::True => Value::Bool(wire::read_bool(reader)?),
            Code::Int8 | Code::Int16 | Code::Int32 | Code::Int64 => {
                Value::Int(wire::read_int(reader)?)
            }
            Code::Uint8 | Code::Uint16 | Code::Uint32 | Code::Uint64 => {
                Value::UInt(wire::read_uint(reader)?)
            }
            Code::Float32 => Value::F32(wire::read_f32(reader)?),
            Code::Float64 => Value::F64(wire::read_f64(reader)?),
            Code::Str8 | Code::Str16 | Code::Str32 => {
                Value::Str(wire::read_str(reader)?.to_owned())
            }
            Code::Bin8 | Code::Bin16 | Code::Bin32 => Value::Bin(wire::read_bin(reader)?.to_vec()),
            Code::Array16 | Code::Array32 => return read_array(reader, depth),
            Code::Map16 | Code::Map32 => return read_map(reader, depth),
            Code::FixExt1
            | Code::FixExt2
            | Code::FixExt4
            | Code::FixExt8
            | Code::FixExt16
            | Code::Ext8
            | Code::Ext16
            | Code::Ext32 => Value::Ext(wire::read_ext(reader)?),
        },
    };
    Ok(value)
}

fn read_array(reader: &mut Reader<'_>, depth: u32) -> Result<Value, Error> {
    let count = wire::read_array_header(reader)? as usize;
    let mut elements = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        elements.push(read_value(reader, depth + 1)?);
    }
    Ok(Value::Array(elements))
}

fn read_map(reader: &mut Reader<'_>, depth: u32) -> Result<Value, Error> {
    let count = wire::read_map_header(reader)? as usize;
    let mut pairs = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        let k = read_value(reader, depth + 1)?;
        let v = read_value(reader, depth + 1)?;
        pairs.push((k, v));
    }
    Ok(Value::Map(pairs))
}

impl Formatter<Value> for ValueFormatter {
    fn write(&self, writer: &mut Writer, value: &Value) -> Result<(), Error> {
        write_value(writer, value)
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<Value, Error> {
        read_value(reader, 0)
    }
}
