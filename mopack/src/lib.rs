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

//! # Mopack
//!
//! Mopack is a MessagePack codec for Rust: a byte-exact implementation of
//! the MessagePack binary format with an async streaming reader, pluggable
//! per-type formatters and bounded buffer reuse, built for services that
//! encode and decode on hot paths.
//!
//! ## Key Features
//!
//! - **Byte-exact wire format**: Interoperates with any conformant
//!   MessagePack implementation — fixint ranges, big-endian fields,
//!   smallest-form integer escalation, the full extension family
//! - **Streaming**: Reassembles complete messages from chunks arriving
//!   over any `AsyncRead`, preserving trailing non-MessagePack bytes
//! - **Pluggable codecs**: Formatters resolve per type through composable,
//!   cached resolver chains
//! - **Allocation-free under load**: Writers and stream buffers come from
//!   bounded rental pools
//!
//! ## Encoding and decoding values
//!
//! ```rust
//! use mopack::Mopack;
//!
//! let engine = Mopack::new();
//!
//! let bytes = engine.serialize(&12345i64)?;
//! assert_eq!(bytes, [0xcd, 0x30, 0x39]); // uint16: the smallest form
//!
//! let value: i64 = engine.deserialize(&bytes)?;
//! assert_eq!(value, 12345);
//! # Ok::<(), mopack::Error>(())
//! ```
//!
//! ## Decoding unknown messages
//!
//! When the shape of a message is only known at runtime, decode it as a
//! [`Value`] tree:
//!
//! ```rust
//! use mopack::{Mopack, Value};
//!
//! let engine = Mopack::new();
//! let bytes = engine.serialize(&Value::Array(vec![
//!     Value::Str("status".into()),
//!     Value::UInt(200),
//! ]))?;
//!
//! match engine.deserialize::<Value>(&bytes)? {
//!     Value::Array(items) => assert_eq!(items.len(), 2),
//!     other => panic!("unexpected shape: {other:?}"),
//! }
//! # Ok::<(), mopack::Error>(())
//! ```
//!
//! ## Streaming
//!
//! [`MessageReader`] turns any `tokio::io::AsyncRead` into a sequence of
//! complete messages, however the bytes were chunked in transit:
//!
//! ```rust,no_run
//! use mopack::MessageReader;
//!
//! # async fn demo(socket: tokio::io::DuplexStream) -> Result<(), mopack::Error> {
//! let mut reader = MessageReader::new(socket);
//! while let Some(message) = reader.next_message().await? {
//!     // `message` holds exactly one complete top-level value
//!     println!("{} byte message", message.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom formatters
//!
//! Any type gains MessagePack support by registering a [`Formatter`];
//! the resolution layer does not care whether a formatter is hand-written
//! or generated:
//!
//! ```rust
//! use mopack::{Error, Formatter, Mopack, Reader, Writer};
//! use mopack::wire;
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! struct PointFormatter;
//!
//! impl Formatter<Point> for PointFormatter {
//!     fn write(&self, writer: &mut Writer, value: &Point) -> Result<(), Error> {
//!         wire::write_array_header(writer, 2);
//!         wire::write_int(writer, value.x as i64);
//!         wire::write_int(writer, value.y as i64);
//!         Ok(())
//!     }
//!
//!     fn read(&self, reader: &mut Reader<'_>) -> Result<Point, Error> {
//!         let count = wire::read_array_header(reader)?;
//!         if count != 2 {
//!             return Err(Error::unexpected_type("expected a two-element array"));
//!         }
//!         Ok(Point {
//!             x: wire::read_int(reader)? as i32,
//!             y: wire::read_int(reader)? as i32,
//!         })
//!     }
//! }
//!
//! let mut engine = Mopack::new();
//! engine.register::<Point, _>(PointFormatter);
//! let bytes = engine.serialize(&Point { x: 3, y: -4 })?;
//! let point: Point = engine.deserialize(&bytes)?;
//! assert_eq!((point.x, point.y), (3, -4));
//! # Ok::<(), mopack::Error>(())
//! ```

pub use mopack_core::buffer::{Reader, Writer};
pub use mopack_core::config::{CollectionDeserializeMode, Config};
pub use mopack_core::error::Error;
pub use mopack_core::ext::{Ext, ExtHeader, Timestamp};
pub use mopack_core::formatter::{
    BTreeMapFormatter, BinaryFormatter, BoolFormatter, BytesFormatter, DateTimeUtcFormatter,
    ExtFormatter, F32Formatter, F64Formatter, FixedI16Formatter, FixedI32Formatter,
    FixedI64Formatter, FixedI8Formatter, FixedU16Formatter, FixedU32Formatter, FixedU64Formatter,
    FixedU8Formatter, Formatter, I16Formatter, I32Formatter, I64Formatter, I8Formatter,
    MapFormatter, NaiveDateTimeFormatter, NilFormatter, OptionFormatter, StringFormatter,
    TimestampFormatter, U16Formatter, U32Formatter, U64Formatter, U8Formatter, Value,
    ValueFormatter, VariantFormatter, VecFormatter,
};
pub use mopack_core::mopack::Mopack;
pub use mopack_core::pool::{BufferPool, Pool, Rental, MIN_SEGMENT_SIZE};
pub use mopack_core::resolver::{
    CompositeResolver, FormatterRegistry, FormatterRegistryBuilder, FormatterResolver,
    ResolveObserver, ResolverExt, Slot,
};
pub use mopack_core::stream::MessageReader;
pub use mopack_core::types::{reserved_ext, Code, Format};
pub use mopack_core::wire;
pub use mopack_core::{ensure, bail};
