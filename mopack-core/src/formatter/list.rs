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

use std::sync::Arc;

use crate::buffer::{Reader, Writer};
use crate::config::CollectionDeserializeMode;
use crate::error::Error;
use crate::formatter::Formatter;
use crate::wire;

// Cap on up-front reservation: a hostile header may claim u32::MAX
// elements while the payload holds none of them.
const PREALLOC_LIMIT: usize = 4096;

/// `Vec<T>` as an array of `T` encodings.
pub struct VecFormatter<T> {
    inner: Arc<dyn Formatter<T>>,
}

impl<T> VecFormatter<T> {
    pub fn new(inner: Arc<dyn Formatter<T>>) -> Self {
        VecFormatter { inner }
    }
}

impl<T> Formatter<Vec<T>> for VecFormatter<T> {
    fn write(&self, writer: &mut Writer, value: &Vec<T>) -> Result<(), Error> {
        let count = u32::try_from(value.len()).map_err(|_| {
            Error::integer_overflow(format!(
                "array of {} elements exceeds the array32 limit",
                value.len()
            ))
        })?;
        wire::write_array_header(writer, count);
        for element in value {
            self.inner.write(writer, element)?;
        }
        Ok(())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<Vec<T>, Error> {
        let count = wire::read_array_header(reader)? as usize;
        let mut out = Vec::with_capacity(count.min(PREALLOC_LIMIT));
        for _ in 0..count {
            out.push(self.inner.read(reader)?);
        }
        Ok(out)
    }

    fn read_into(
        &self,
        reader: &mut Reader<'_>,
        target: &mut Vec<T>,
        mode: CollectionDeserializeMode,
    ) -> Result<(), Error> {
        if mode == CollectionDeserializeMode::OverwriteReplace {
            target.clear();
        }
        let count = wire::read_array_header(reader)? as usize;
        target.reserve(count.min(PREALLOC_LIMIT));
        for _ in 0..count {
            target.push(self.inner.read(reader)?);
        }
        Ok(())
    }
}
