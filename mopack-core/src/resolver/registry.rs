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

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::CollectionDeserializeMode;
use crate::ext::{Ext, Timestamp};
use crate::formatter::{
    BinaryFormatter, BoolFormatter, BytesFormatter, DateTimeUtcFormatter, ExtFormatter,
    F32Formatter, F64Formatter, Formatter, I16Formatter, I32Formatter, I64Formatter, I8Formatter,
    NaiveDateTimeFormatter, NilFormatter, StringFormatter, TimestampFormatter, U16Formatter,
    U32Formatter, U64Formatter, U8Formatter, Value, ValueFormatter,
};
use crate::resolver::{formatter_slot, value_slot, FormatterResolver, Slot};

/// An immutable, builder-populated formatter registry.
///
/// Registration happens up front through [`FormatterRegistryBuilder`];
/// after `build` the map never changes, which is what makes sharing a
/// registry across threads free of synchronization.
pub struct FormatterRegistry {
    name: &'static str,
    entries: HashMap<TypeId, Slot>,
}

impl FormatterRegistry {
    pub fn builder(name: &'static str) -> FormatterRegistryBuilder {
        FormatterRegistryBuilder {
            name,
            entries: HashMap::new(),
        }
    }

    /// The registry of built-in formatters: nil, bool, all integer
    /// widths, floats, String, binary ([`Vec<u8>`] and [`Bytes`]),
    /// extensions, timestamps and chrono types, the dynamic [`Value`]
    /// tree — plus the default [`CollectionDeserializeMode`] as a
    /// resolvable configuration value.
    pub fn standard() -> FormatterRegistry {
        FormatterRegistry::builder("standard")
            .register::<(), _>(NilFormatter)
            .register::<bool, _>(BoolFormatter)
            .register::<u8, _>(U8Formatter)
            .register::<u16, _>(U16Formatter)
            .register::<u32, _>(U32Formatter)
            .register::<u64, _>(U64Formatter)
            .register::<i8, _>(I8Formatter)
            .register::<i16, _>(I16Formatter)
            .register::<i32, _>(I32Formatter)
            .register::<i64, _>(I64Formatter)
            .register::<f32, _>(F32Formatter)
            .register::<f64, _>(F64Formatter)
            .register::<String, _>(StringFormatter)
            .register::<Vec<u8>, _>(BinaryFormatter)
            .register::<Bytes, _>(BytesFormatter)
            .register::<Ext, _>(ExtFormatter)
            .register::<Timestamp, _>(TimestampFormatter)
            .register::<DateTime<Utc>, _>(DateTimeUtcFormatter)
            .register::<NaiveDateTime, _>(NaiveDateTimeFormatter)
            .register::<Value, _>(ValueFormatter)
            .register_value(CollectionDeserializeMode::default())
            .build()
    }
}

impl FormatterResolver for FormatterRegistry {
    fn resolve_any(&self, type_id: TypeId) -> Option<Slot> {
        self.entries.get(&type_id).cloned()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Builder for [`FormatterRegistry`]. Later registrations for the same
/// type replace earlier ones.
#[derive(Clone)]
pub struct FormatterRegistryBuilder {
    name: &'static str,
    entries: HashMap<TypeId, Slot>,
}

impl FormatterRegistryBuilder {
    /// Registers a formatter for `T`.
    pub fn register<T, F>(self, formatter: F) -> Self
    where
        T: 'static,
        F: Formatter<T> + 'static,
    {
        self.register_arc::<T>(Arc::new(formatter))
    }

    /// Registers an already-shared formatter for `T`.
    pub fn register_arc<T: 'static>(mut self, formatter: Arc<dyn Formatter<T>>) -> Self {
        self.entries
            .insert(TypeId::of::<T>(), formatter_slot(formatter));
        self
    }

    /// Registers a configuration value resolvable by its type.
    pub fn register_value<V: Send + Sync + 'static>(mut self, value: V) -> Self {
        self.entries.insert(TypeId::of::<V>(), value_slot(value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> FormatterRegistry {
        FormatterRegistry {
            name: self.name,
            entries: self.entries,
        }
    }
}
