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

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;

use crate::buffer::{Reader, Writer};
use crate::config::CollectionDeserializeMode;
use crate::error::Error;
use crate::formatter::Formatter;
use crate::wire;

fn map_count(len: usize) -> Result<u32, Error> {
    u32::try_from(len).map_err(|_| {
        Error::integer_overflow(format!("map of {len} pairs exceeds the map32 limit"))
    })
}

/// `HashMap<K, V>` as a map of `K`/`V` encodings. Iteration order, and so
/// the encoded pair order, is unspecified.
pub struct MapFormatter<K, V> {
    key: Arc<dyn Formatter<K>>,
    value: Arc<dyn Formatter<V>>,
}

impl<K, V> MapFormatter<K, V> {
    pub fn new(key: Arc<dyn Formatter<K>>, value: Arc<dyn Formatter<V>>) -> Self {
        MapFormatter { key, value }
    }
}

impl<K, V> Formatter<HashMap<K, V>> for MapFormatter<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    fn write(&self, writer: &mut Writer, value: &HashMap<K, V>) -> Result<(), Error> {
        wire::write_map_header(writer, map_count(value.len())?);
        for (k, v) in value {
            self.key.write(writer, k)?;
            self.value.write(writer, v)?;
        }
        Ok(())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<HashMap<K, V>, Error> {
        let mut out = HashMap::new();
        self.read_entries(reader, &mut out)?;
        Ok(out)
    }

    fn read_into(
        &self,
        reader: &mut Reader<'_>,
        target: &mut HashMap<K, V>,
        mode: CollectionDeserializeMode,
    ) -> Result<(), Error> {
        if mode == CollectionDeserializeMode::OverwriteReplace {
            target.clear();
        }
        self.read_entries(reader, target)
    }
}

impl<K, V> MapFormatter<K, V>
where
    K: Eq + Hash,
{
    fn read_entries(
        &self,
        reader: &mut Reader<'_>,
        target: &mut HashMap<K, V>,
    ) -> Result<(), Error> {
        let count = wire::read_map_header(reader)?;
        for _ in 0..count {
            let k = self.key.read(reader)?;
            let v = self.value.read(reader)?;
            target.insert(k, v);
        }
        Ok(())
    }
}

/// `BTreeMap<K, V>`; pair order on the wire follows the key order.
pub struct BTreeMapFormatter<K, V> {
    key: Arc<dyn Formatter<K>>,
    value: Arc<dyn Formatter<V>>,
}

impl<K, V> BTreeMapFormatter<K, V> {
    pub fn new(key: Arc<dyn Formatter<K>>, value: Arc<dyn Formatter<V>>) -> Self {
        BTreeMapFormatter { key, value }
    }
}

impl<K, V> Formatter<BTreeMap<K, V>> for BTreeMapFormatter<K, V>
where
    K: Ord + Send + Sync,
    V: Send + Sync,
{
    fn write(&self, writer: &mut Writer, value: &BTreeMap<K, V>) -> Result<(), Error> {
        wire::write_map_header(writer, map_count(value.len())?);
        for (k, v) in value {
            self.key.write(writer, k)?;
            self.value.write(writer, v)?;
        }
        Ok(())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<BTreeMap<K, V>, Error> {
        let mut out = BTreeMap::new();
        self.read_entries(reader, &mut out)?;
        Ok(out)
    }

    fn read_into(
        &self,
        reader: &mut Reader<'_>,
        target: &mut BTreeMap<K, V>,
        mode: CollectionDeserializeMode,
    ) -> Result<(), Error> {
        if mode == CollectionDeserializeMode::OverwriteReplace {
            target.clear();
        }
        self.read_entries(reader, target)
    }
}

impl<K, V> BTreeMapFormatter<K, V>
where
    K: Ord,
{
    fn read_entries(
        &self,
        reader: &mut Reader<'_>,
        target: &mut BTreeMap<K, V>,
    ) -> Result<(), Error> {
        let count = wire::read_map_header(reader)?;
        for _ in 0..count {
            let k = self.key.read(reader)?;
            let v = self.value.read(reader)?;
            target.insert(k, v);
        }
        Ok(())
    }
}
