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

//! Per-type codecs.
//!
//! A [`Formatter<T>`] pairs the encode and decode logic for one type. The
//! resolution layer ([`crate::resolver`]) hands formatters out as
//! `Arc<dyn Formatter<T>>` without caring how they were produced — the
//! built-ins here, compositions like [`VecFormatter`], or anything a
//! caller registers.

use crate::buffer::{Reader, Writer};
use crate::config::CollectionDeserializeMode;
use crate::error::Error;
use crate::wire;

mod binary;
mod bool;
mod datetime;
mod ext;
mod list;
mod map;
mod number;
mod option;
mod string;
mod value;
mod variant;

pub use self::binary::{BinaryFormatter, BytesFormatter};
pub use self::bool::BoolFormatter;
pub use self::datetime::{DateTimeUtcFormatter, NaiveDateTimeFormatter, TimestampFormatter};
pub use self::ext::ExtFormatter;
pub use self::list::VecFormatter;
pub use self::map::{BTreeMapFormatter, MapFormatter};
pub use self::number::{
    F32Formatter, F64Formatter, FixedI16Formatter, FixedI32Formatter, FixedI64Formatter,
    FixedI8Formatter, FixedU16Formatter, FixedU32Formatter, FixedU64Formatter, FixedU8Formatter,
    I16Formatter, I32Formatter, I64Formatter, I8Formatter, U16Formatter, U32Formatter,
    U64Formatter, U8Formatter,
};
pub use self::option::OptionFormatter;
pub use self::string::StringFormatter;
pub use self::value::{Value, ValueFormatter};
pub use self::variant::VariantFormatter;

/// Paired encode and decode logic for one type.
///
/// Object-safe so resolvers can store and hand out formatters as trait
/// objects; `Send + Sync` so one formatter instance serves all threads.
pub trait Formatter<T>: Send + Sync {
    /// Appends the canonical encoding of `value`.
    fn write(&self, writer: &mut Writer, value: &T) -> Result<(), Error>;

    /// Decodes one value, advancing the reader past it.
    fn read(&self, reader: &mut Reader<'_>) -> Result<T, Error>;

    /// Decodes into an existing value.
    ///
    /// The default replaces `target` wholesale; collection formatters
    /// override it to honor the [`CollectionDeserializeMode`].
    fn read_into(
        &self,
        reader: &mut Reader<'_>,
        target: &mut T,
        mode: CollectionDeserializeMode,
    ) -> Result<(), Error> {
        let _ = mode;
        *target = self.read(reader)?;
        Ok(())
    }
}

/// Formatter for the unit value, encoded as nil.
pub struct NilFormatter;

impl Formatter<()> for NilFormatter {
    fn write(&self, writer: &mut Writer, _value: &()) -> Result<(), Error> {
        wire::write_nil(writer);
        Ok(())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<(), Error> {
        wire::read_nil(reader)
    }
}
