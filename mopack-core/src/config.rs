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

use std::sync::OnceLock;

/// How deserializing into an existing collection combines with what the
/// collection already holds.
///
/// Resolvable through the formatter-resolution mechanism like any codec
/// (see [`ResolverExt::resolve_value`]); the default everywhere is
/// [`CollectionDeserializeMode::OverwriteReplace`].
///
/// [`ResolverExt::resolve_value`]: crate::resolver::ResolverExt::resolve_value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollectionDeserializeMode {
    /// Discard existing contents before filling the collection.
    #[default]
    OverwriteReplace,
    /// Merge decoded entries into the existing contents.
    Add,
}

/// Configuration for a [`Mopack`] engine instance.
///
/// All knobs are fixed at construction; there is no runtime
/// reconfiguration. The process-wide default is immutable — overriding is
/// explicit, via [`Mopack::with_config`].
///
/// [`Mopack`]: crate::mopack::Mopack
/// [`Mopack::with_config`]: crate::mopack::Mopack::with_config
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Collection merge behavior for `deserialize_into`.
    pub collection_deserialize_mode: CollectionDeserializeMode,
    /// Upper bound on idle pooled output writers.
    pub writer_pool_size: usize,
    /// Upper bound on idle pooled stream buffers.
    pub buffer_pool_size: usize,
    /// Minimum segment size for pooled stream buffers, floored at
    /// [`MIN_SEGMENT_SIZE`](crate::pool::MIN_SEGMENT_SIZE).
    pub buffer_segment_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            collection_deserialize_mode: CollectionDeserializeMode::OverwriteReplace,
            writer_pool_size: 16,
            buffer_pool_size: 8,
            buffer_segment_size: crate::pool::MIN_SEGMENT_SIZE,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The immutable process-wide default.
    pub fn global() -> &'static Config {
        static GLOBAL: OnceLock<Config> = OnceLock::new();
        GLOBAL.get_or_init(Config::default)
    }

    pub fn collection_deserialize_mode(mut self, mode: CollectionDeserializeMode) -> Self {
        self.collection_deserialize_mode = mode;
        self
    }

    pub fn writer_pool_size(mut self, size: usize) -> Self {
        self.writer_pool_size = size;
        self
    }

    pub fn buffer_pool_size(mut self, size: usize) -> Self {
        self.buffer_pool_size = size;
        self
    }

    pub fn buffer_segment_size(mut self, size: usize) -> Self {
        self.buffer_segment_size = size;
        self
    }

    /// Check the collection merge behavior.
    #[inline(always)]
    pub fn is_additive_collections(&self) -> bool {
        self.collection_deserialize_mode == CollectionDeserializeMode::Add
    }
}
