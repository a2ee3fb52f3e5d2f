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

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::formatter::Formatter;
use crate::wire;

/// UTF-8 strings through the str family.
pub struct StringFormatter;

impl Formatter<String> for StringFormatter {
    fn write(&self, writer: &mut Writer, value: &String) -> Result<(), Error> {
        wire::write_str(writer, value)
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<String, Error> {
        Ok(wire::read_str(reader)?.to_owned())
    }
}
