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

//! Time values through the standard timestamp extension (type code −1).

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::ext::Timestamp;
use crate::formatter::Formatter;
use crate::wire;

/// [`Timestamp`] values in their smallest standard layout.
pub struct TimestampFormatter;

impl Formatter<Timestamp> for TimestampFormatter {
    fn write(&self, writer: &mut Writer, value: &Timestamp) -> Result<(), Error> {
        wire::write_ext(writer, &value.to_ext())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<Timestamp, Error> {
        Timestamp::from_ext(&wire::read_ext(reader)?)
    }
}

fn to_datetime(ts: Timestamp) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(ts.seconds(), ts.nanos()).ok_or_else(|| {
        Error::invalid_data(format!(
            "timestamp {}s {}ns is outside the representable range",
            ts.seconds(),
            ts.nanos()
        ))
    })
}

/// `DateTime<Utc>` via [`Timestamp`].
pub struct DateTimeUtcFormatter;

impl Formatter<DateTime<Utc>> for DateTimeUtcFormatter {
    fn write(&self, writer: &mut Writer, value: &DateTime<Utc>) -> Result<(), Error> {
        let ts = Timestamp::new(value.timestamp(), value.timestamp_subsec_nanos())?;
        wire::write_ext(writer, &ts.to_ext())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<DateTime<Utc>, Error> {
        let ts = Timestamp::from_ext(&wire::read_ext(reader)?)?;
        to_datetime(ts)
    }
}

/// `NaiveDateTime`, interpreted as UTC on the wire.
pub struct NaiveDateTimeFormatter;

impl Formatter<NaiveDateTime> for NaiveDateTimeFormatter {
    fn write(&self, writer: &mut Writer, value: &NaiveDateTime) -> Result<(), Error> {
        let utc = value.and_utc();
        let ts = Timestamp::new(utc.timestamp(), utc.timestamp_subsec_nanos())?;
        wire::write_ext(writer, &ts.to_ext())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<NaiveDateTime, Error> {
        let ts = Timestamp::from_ext(&wire::read_ext(reader)?)?;
        Ok(to_datetime(ts)?.naive_utc())
    }
}
