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

//! Integer and float formatters.
//!
//! The plain formatters emit the smallest wire form for the magnitude and
//! accept any integer form on read, range-checking into the target width.
//! The `Fixed*` formatters always emit the full-width form, for callers
//! that need the encoded layout stable across magnitudes.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::formatter::Formatter;
use crate::wire;

macro_rules! uint_formatter {
    ($name:ident, $ty:ty) => {
        pub struct $name;

        impl Formatter<$ty> for $name {
            fn write(&self, writer: &mut Writer, value: &$ty) -> Result<(), Error> {
                wire::write_uint(writer, *value as u64);
                Ok(())
            }

            fn read(&self, reader: &mut Reader<'_>) -> Result<$ty, Error> {
                let v = wire::read_uint(reader)?;
                <$ty>::try_from(v).map_err(|_| {
                    Error::integer_overflow(format!(
                        "value {v} does not fit {}",
                        stringify!($ty)
                    ))
                })
            }
        }
    };
}

macro_rules! int_formatter {
    ($name:ident, $ty:ty) => {
        pub struct $name;

        impl Formatter<$ty> for $name {
            fn write(&self, writer: &mut Writer, value: &$ty) -> Result<(), Error> {
                wire::write_int(writer, *value as i64);
                Ok(())
            }

            fn read(&self, reader: &mut Reader<'_>) -> Result<$ty, Error> {
                let v = wire::read_int(reader)?;
                <$ty>::try_from(v).map_err(|_| {
                    Error::integer_overflow(format!(
                        "value {v} does not fit {}",
                        stringify!($ty)
                    ))
                })
            }
        }
    };
}

uint_formatter!(U8Formatter, u8);
uint_formatter!(U16Formatter, u16);
uint_formatter!(U32Formatter, u32);
uint_formatter!(U64Formatter, u64);
int_formatter!(I8Formatter, i8);
int_formatter!(I16Formatter, i16);
int_formatter!(I32Formatter, i32);
int_formatter!(I64Formatter, i64);

macro_rules! fixed_formatter {
    ($name:ident, $ty:ty, $write:ident, $read:ident) => {
        /// Always emits the full-width wire form.
        pub struct $name;

        impl Formatter<$ty> for $name {
            fn write(&self, writer: &mut Writer, value: &$ty) -> Result<(), Error> {
                wire::$write(writer, *value);
                Ok(())
            }

            fn read(&self, reader: &mut Reader<'_>) -> Result<$ty, Error> {
                let v = wire::$read(reader)?;
                <$ty>::try_from(v).map_err(|_| {
                    Error::integer_overflow(format!(
                        "value {v} does not fit {}",
                        stringify!($ty)
                    ))
                })
            }
        }
    };
}

fixed_formatter!(FixedU8Formatter, u8, write_fixed_u8, read_uint);
fixed_formatter!(FixedU16Formatter, u16, write_fixed_u16, read_uint);
fixed_formatter!(FixedU32Formatter, u32, write_fixed_u32, read_uint);
fixed_formatter!(FixedU64Formatter, u64, write_fixed_u64, read_uint);
fixed_formatter!(FixedI8Formatter, i8, write_fixed_i8, read_int);
fixed_formatter!(FixedI16Formatter, i16, write_fixed_i16, read_int);
fixed_formatter!(FixedI32Formatter, i32, write_fixed_i32, read_int);
fixed_formatter!(FixedI64Formatter, i64, write_fixed_i64, read_int);

pub struct F32Formatter;

impl Formatter<f32> for F32Formatter {
    fn write(&self, writer: &mut Writer, value: &f32) -> Result<(), Error> {
        wire::write_f32(writer, *value);
        Ok(())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<f32, Error> {
        wire::read_f32(reader)
    }
}

pub struct F64Formatter;

impl Formatter<f64> for F64Formatter {
    fn write(&self, writer: &mut Writer, value: &f64) -> Result<(), Error> {
        wire::write_f64(writer, *value);
        Ok(())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<f64, Error> {
        wire::read_f64(reader)
    }
}
