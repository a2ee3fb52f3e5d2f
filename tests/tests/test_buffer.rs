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

use mopack::{Error, Reader, Writer};

#[test]
fn test_writer_is_big_endian() {
    let mut writer = Writer::default();
    writer.write_u16(0x0102);
    writer.write_u32(0x03040506);
    writer.write_u64(0x0708090a0b0c0d0e);
    assert_eq!(
        writer.as_slice(),
        [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e]
    );
}

#[test]
fn test_writer_skip_and_patch() {
    let mut writer = Writer::default();
    writer.write_u8(0xaa);
    let header = writer.skip(2);
    writer.write_u8(0xbb);
    writer.set_bytes(header, &[0x01, 0x02]);
    assert_eq!(writer.as_slice(), [0xaa, 0x01, 0x02, 0xbb]);
}

#[test]
fn test_writer_reset_keeps_nothing_logical() {
    let mut writer = Writer::default();
    writer.write_bytes(&[1, 2, 3]);
    assert_eq!(writer.len(), 3);
    writer.reset();
    assert!(writer.is_empty());
    assert_eq!(writer.dump(), Vec::<u8>::new());
}

#[test]
fn test_reader_cursor_and_remaining() {
    let data = [0x01, 0x00, 0x02, 0xca, 0xfe];
    let mut reader = Reader::new(&data);
    assert_eq!(reader.read_u8().unwrap(), 0x01);
    assert_eq!(reader.read_u16().unwrap(), 0x0002);
    assert_eq!(reader.cursor(), 3);
    assert_eq!(reader.remaining(), &[0xca, 0xfe]);
    assert_eq!(reader.read_bytes(2).unwrap(), &[0xca, 0xfe]);
    assert!(reader.is_empty());
}

#[test]
fn test_reader_peek_does_not_consume() {
    let data = [0x42];
    let mut reader = Reader::new(&data);
    assert_eq!(reader.peek_u8().unwrap(), 0x42);
    assert_eq!(reader.peek_u8().unwrap(), 0x42);
    assert_eq!(reader.read_u8().unwrap(), 0x42);
}

#[test]
fn test_reader_short_reads_are_truncated_message() {
    let data = [0x01, 0x02];
    let mut reader = Reader::new(&data);
    assert!(matches!(reader.read_u32(), Err(Error::TruncatedMessage)));
    // the failed read consumed nothing
    assert_eq!(reader.cursor(), 0);
    assert_eq!(reader.read_u16().unwrap(), 0x0102);
    assert!(matches!(reader.read_u8(), Err(Error::TruncatedMessage)));
}
