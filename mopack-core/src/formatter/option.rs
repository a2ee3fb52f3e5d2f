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
use crate::error::Error;
use crate::formatter::Formatter;
use crate::wire;

/// `Option<T>` as nil-or-value.
///
/// An inner formatter that itself emits nil for some value is
/// indistinguishable from `None` on the wire; that ambiguity is inherent
/// to the encoding, not to this formatter.
pub struct OptionFormatter<T> {
    inner: Arc<dyn Formatter<T>>,
}

impl<T> OptionFormatter<T> {
    pub fn new(inner: Arc<dyn Formatter<T>>) -> Self {
        OptionFormatter { inner }
    }
}

impl<T> Formatter<Option<T>> for OptionFormatter<T> {
    fn write(&self, writer: &mut Writer, value: &Option<T>) -> Result<(), Error> {
        match value {
            Some(v) => self.inner.write(writer, v),
            None => {
                wire::write_nil(writer);
                Ok(())
            }
        }
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<Option<T>, Error> {
        if wire::peek_is_nil(reader)? {
            reader.advance(1);
            return Ok(None);
        }
        Ok(Some(self.inner.read(reader)?))
    }
}
