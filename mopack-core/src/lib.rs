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

//! # Mopack Core
//!
//! This is the core implementation of the mopack MessagePack codec.
//! It provides byte-exact encode/decode of the MessagePack wire format
//! together with the machinery that makes a codec usable in production:
//! streaming reassembly, pluggable per-type formatters and buffer reuse.
//!
//! ## Architecture
//!
//! The core library is organized into several key modules:
//!
//! - **`mopack`**: The serialization engine and public entry points
//! - **`wire`**: Stateless wire primitives — one `try_read`/`write` pair
//!   per MessagePack value kind, byte-exact against the format
//! - **`buffer`**: Binary buffer management with big-endian Writer/Reader
//! - **`stream`**: Incremental message reassembly over an async byte source
//! - **`resolver`**: Type-to-formatter resolution, composition and caching
//! - **`formatter`**: Built-in per-type codecs
//! - **`pool`**: Bounded reuse pools for writers and stream buffers
//! - **`ext`**: The extension envelope and the standard timestamp
//! - **`types`**: The format-code space and reserved extension codes
//! - **`error`**: Error handling and result types
//!
//! ## Key Concepts
//!
//! ### Insufficient data is not an error
//!
//! Every `try_read_*` primitive distinguishes "the buffer ends before the
//! value does" ([`wire::Decoded::Partial`]) from "this byte sequence is
//! not MessagePack" (an error). The streaming reader leans on that to pull
//! exactly as many chunks as a message needs, and never to misreport a
//! slow peer as a protocol violation.
//!
//! ### Formatters and resolvers
//!
//! A formatter pairs encode and decode logic for one type; a resolver
//! maps types to formatters. Resolvers compose in ordered chains with
//! per-type caching, so "which codec handles `T`" is answered once per
//! process, not once per message.
//!
//! ## Usage
//!
//! This crate is typically used through the higher-level `mopack` crate,
//! which re-exports the public API. The core types work directly as well:
//!
//! ```rust
//! use mopack_core::mopack::Mopack;
//!
//! let engine = Mopack::new();
//! let bytes = engine.serialize(&String::from("hello"))?;
//! assert_eq!(bytes[0], 0xa5); // fixstr, length 5
//! let text: String = engine.deserialize(&bytes)?;
//! assert_eq!(text, "hello");
//! # Ok::<(), mopack_core::error::Error>(())
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod ext;
pub mod formatter;
pub mod mopack;
pub mod pool;
pub mod resolver;
pub mod stream;
pub mod types;
pub mod wire;

pub use crate::error::Error;
pub use crate::mopack::Mopack;
