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

//! The serialization engine: resolver, configuration and pooled buffers
//! behind one entry point.

use std::sync::Arc;

use crate::buffer::{Reader, Writer};
use crate::config::{CollectionDeserializeMode, Config};
use crate::error::Error;
use crate::formatter::Formatter;
use crate::pool::Pool;
use crate::resolver::{
    CompositeResolver, FormatterRegistry, FormatterRegistryBuilder, FormatterResolver, ResolverExt,
};

/// The MessagePack engine.
///
/// Owns a formatter resolver, a [`Config`] and a bounded pool of output
/// writers, so repeated `serialize` calls run allocation-free once the
/// pool is warm. Cheap to share behind an `Arc`; all methods take `&self`
/// except registration, which belongs to the setup phase.
///
/// # Examples
/// ```
/// use mopack_core::mopack::Mopack;
///
/// let engine = Mopack::new();
/// let bytes = engine.serialize(&42i64)?;
/// let value: i64 = engine.deserialize(&bytes)?;
/// assert_eq!(value, 42);
/// # Ok::<(), mopack_core::error::Error>(())
/// ```
pub struct Mopack {
    config: Config,
    user: FormatterRegistryBuilder,
    base: Arc<dyn FormatterResolver>,
    /// User registrations layered over `base`, cached per type. Rebuilt on
    /// every setup-phase mutation so resolution stays one map probe.
    effective: Arc<dyn FormatterResolver>,
    writer_pool: Pool<Writer>,
}

impl Default for Mopack {
    fn default() -> Self {
        let config = *Config::global();
        let base: Arc<dyn FormatterResolver> = Arc::new(CompositeResolver::new(vec![Arc::new(
            FormatterRegistry::standard(),
        )]));
        Mopack {
            config,
            user: FormatterRegistry::builder("user"),
            effective: Arc::clone(&base),
            base,
            writer_pool: new_writer_pool(config.writer_pool_size),
        }
    }
}

fn new_writer_pool(max_size: usize) -> Pool<Writer> {
    Pool::with_reset(max_size, Writer::default, Writer::reset)
}

impl Mopack {
    /// Creates an engine with the standard formatters and the process-wide
    /// default [`Config`].
    pub fn new() -> Mopack {
        Mopack::default()
    }

    /// Replaces the configuration. Setup-phase only.
    ///
    /// The configured collection mode is registered as a resolvable value
    /// ahead of the standard registry's default, so resolution remains the
    /// single source of truth for it.
    pub fn with_config(mut self, config: Config) -> Mopack {
        self.config = config;
        self.user = self
            .user
            .clone()
            .register_value(config.collection_deserialize_mode);
        self.writer_pool = new_writer_pool(config.writer_pool_size);
        self.rebuild_resolver();
        self
    }

    /// Replaces the base resolver chain. Formatters registered via
    /// [`Mopack::register`] still take precedence.
    pub fn with_resolver(mut self, resolver: Arc<dyn FormatterResolver>) -> Mopack {
        self.base = resolver;
        self.rebuild_resolver();
        self
    }

    /// Registers a formatter for `T`, shadowing any the base resolver has.
    pub fn register<T, F>(&mut self, formatter: F)
    where
        T: 'static,
        F: Formatter<T> + 'static,
    {
        self.user = self.user.clone().register::<T, F>(formatter);
        self.rebuild_resolver();
    }

    fn rebuild_resolver(&mut self) {
        self.effective = if self.user.is_empty() {
            Arc::clone(&self.base)
        } else {
            Arc::new(CompositeResolver::new(vec![
                Arc::new(self.user.clone().build()),
                Arc::clone(&self.base),
            ]))
        };
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The resolver answering this engine's lookups.
    pub fn resolver(&self) -> Arc<dyn FormatterResolver> {
        Arc::clone(&self.effective)
    }

    /// Encodes `value` into a fresh byte vector.
    pub fn serialize<T: 'static>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let formatter = self.effective.resolve_required::<T>()?;
        let mut writer = self.writer_pool.rent();
        formatter.write(&mut writer, value)?;
        Ok(writer.dump())
    }

    /// Decodes one value occupying the whole buffer; trailing bytes are an
    /// error. Use [`Mopack::deserialize_prefix`] or the streaming reader
    /// for concatenated messages.
    pub fn deserialize<T: 'static>(&self, buf: &[u8]) -> Result<T, Error> {
        let (value, read) = self.deserialize_prefix(buf)?;
        ensure_fully_consumed(buf, read)?;
        Ok(value)
    }

    /// Decodes one value from the front of the buffer, returning it with
    /// the number of bytes it occupied.
    pub fn deserialize_prefix<T: 'static>(&self, buf: &[u8]) -> Result<(T, usize), Error> {
        let formatter = self.effective.resolve_required::<T>()?;
        let mut reader = Reader::new(buf);
        let value = formatter.read(&mut reader)?;
        Ok((value, reader.cursor()))
    }

    /// Decodes one value occupying the whole buffer into an existing
    /// instance. For collections, pre-existing contents combine per the
    /// resolved [`CollectionDeserializeMode`] (default: overwrite).
    pub fn deserialize_into<T: 'static>(&self, buf: &[u8], target: &mut T) -> Result<(), Error> {
        let formatter = self.effective.resolve_required::<T>()?;
        let mode = self
            .effective
            .resolve_value::<CollectionDeserializeMode>()
            .map(|m| *m)
            .unwrap_or(self.config.collection_deserialize_mode);
        let mut reader = Reader::new(buf);
        formatter.read_into(&mut reader, target, mode)?;
        ensure_fully_consumed(buf, reader.cursor())
    }
}

fn ensure_fully_consumed(buf: &[u8], read: usize) -> Result<(), Error> {
    if read != buf.len() {
        return Err(Error::invalid_data(format!(
            "{} trailing bytes after the decoded value",
            buf.len() - read
        )));
    }
    Ok(())
}
