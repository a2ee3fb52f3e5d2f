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

//! Tagged-union dispatch.
//!
//! A value is encoded as a two-element array `[tag, payload]`: a small
//! unsigned discriminant selecting one of a closed set of arm formatters,
//! each of which knows how to encode/decode the payload for its subtype.
//! An optional fallback arm handles tags the reader does not know.

use std::collections::HashMap;
use std::sync::Arc;

use crate::buffer::{Reader, Writer};
use crate::ensure;
use crate::error::Error;
use crate::formatter::Formatter;
use crate::wire;

/// Runtime-subtype dispatch over a closed tag set.
pub struct VariantFormatter<T> {
    tag_of: Box<dyn Fn(&T) -> u32 + Send + Sync>,
    arms: HashMap<u32, Arc<dyn Formatter<T>>>,
    fallback: Option<Arc<dyn Formatter<T>>>,
}

impl<T> VariantFormatter<T> {
    /// Creates a dispatcher; `tag_of` names the arm a value encodes with.
    pub fn new<F>(tag_of: F) -> Self
    where
        F: Fn(&T) -> u32 + Send + Sync + 'static,
    {
        VariantFormatter {
            tag_of: Box::new(tag_of),
            arms: HashMap::new(),
            fallback: None,
        }
    }

    /// Registers the formatter for one tag.
    pub fn arm(mut self, tag: u32, formatter: Arc<dyn Formatter<T>>) -> Self {
        self.arms.insert(tag, formatter);
        self
    }

    /// Registers the formatter decoding payloads of unknown tags.
    pub fn fallback(mut self, formatter: Arc<dyn Formatter<T>>) -> Self {
        self.fallback = Some(formatter);
        self
    }
}

impl<T> Formatter<T> for VariantFormatter<T> {
    fn write(&self, writer: &mut Writer, value: &T) -> Result<(), Error> {
        let tag = (self.tag_of)(value);
        let arm = self.arms.get(&tag).ok_or_else(|| {
            Error::unexpected_type(format!("no arm registered for variant tag {tag}"))
        })?;
        wire::write_array_header(writer, 2);
        wire::write_uint(writer, tag as u64);
        arm.write(writer, value)
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<T, Error> {
        let count = wire::read_array_header(reader)?;
        ensure!(
            count == 2,
            Error::unexpected_type(format!(
                "variant envelope must be a two-element array, found {count} elements"
            ))
        );
        let tag = wire::read_uint(reader)?;
        let tag = u32::try_from(tag)
            .map_err(|_| Error::integer_overflow(format!("variant tag {tag} does not fit u32")))?;
        match self.arms.get(&tag).or(self.fallback.as_ref()) {
            Some(arm) => arm.read(reader),
            None => Err(Error::unexpected_type(format!(
                "unknown variant tag {tag} and no fallback arm"
            ))),
        }
    }
}
