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

use bytes::Bytes;

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::formatter::Formatter;
use crate::wire;

/// `Vec<u8>` through the bin family.
///
/// Note this shadows the element-wise encoding a `VecFormatter<u8>` would
/// produce; byte blobs are binary on the wire, not arrays of integers.
pub struct BinaryFormatter;

impl Formatter<Vec<u8>> for BinaryFormatter {
    fn write(&self, writer: &mut Writer, value: &Vec<u8>) -> Result<(), Error> {
        wire::write_bin(writer, value)
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<Vec<u8>, Error> {
        Ok(wire::read_bin(reader)?.to_vec())
    }
}

/// [`Bytes`] through the bin family.
pub struct BytesFormatter;

impl Formatter<Bytes> for BytesFormatter {
    fn write(&self, writer: &mut Writer, value: &Bytes) -> Result<(), Error> {
        wire::write_bin(writer, value)
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<Bytes, Error> {
        Ok(Bytes::copy_from_slice(wire::read_bin(reader)?))
    }
}
