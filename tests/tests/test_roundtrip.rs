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

//! Round-trips at the boundary magnitudes of every format-code class,
//! with the encoded length asserted against the smallest-form rule.

use std::collections::HashMap;
use std::sync::Arc;

use mopack::{I64Formatter, MapFormatter, Mopack, U64Formatter, VecFormatter};

#[test]
fn test_signed_integer_boundaries() {
    let engine = Mopack::new();
    let test_data: Vec<(i64, usize)> = vec![
        // positive fixint
        (0, 1),
        (1, 1),
        (127, 1),
        // non-negative values take the unsigned ladder
        (128, 2),
        (255, 2),
        (256, 3),
        (65_535, 3),
        (65_536, 5),
        (u32::MAX as i64, 5),
        (u32::MAX as i64 + 1, 9),
        (i64::MAX, 9),
        // negative fixint
        (-1, 1),
        (-32, 1),
        // int8..int64
        (-33, 2),
        (-128, 2),
        (-129, 3),
        (-32_768, 3),
        (-32_769, 5),
        (i32::MIN as i64, 5),
        (i32::MIN as i64 - 1, 9),
        (i64::MIN, 9),
    ];
    for &(value, encoded_len) in &test_data {
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(bytes.len(), encoded_len, "encoded length for {value}");
        let back: i64 = engine.deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }
}

#[test]
fn test_unsigned_integer_boundaries() {
    let engine = Mopack::new();
    let test_data: Vec<(u64, usize)> = vec![
        (0, 1),
        (127, 1),
        (128, 2),
        (255, 2),
        (256, 3),
        (65_535, 3),
        (65_536, 5),
        (u32::MAX as u64, 5),
        (u32::MAX as u64 + 1, 9),
        (u64::MAX, 9),
    ];
    for &(value, encoded_len) in &test_data {
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(bytes.len(), encoded_len, "encoded length for {value}");
        let back: u64 = engine.deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }
}

#[test]
fn test_narrow_integer_widths() {
    let engine = Mopack::new();
    for value in [u8::MIN, 1, u8::MAX] {
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(engine.deserialize::<u8>(&bytes).unwrap(), value);
    }
    for value in [i16::MIN, -1, 0, i16::MAX] {
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(engine.deserialize::<i16>(&bytes).unwrap(), value);
    }
    for value in [u32::MIN, u32::MAX] {
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(engine.deserialize::<u32>(&bytes).unwrap(), value);
    }
}

#[test]
fn test_nil_and_bool_are_single_bytes() {
    let engine = Mopack::new();
    assert_eq!(engine.serialize(&()).unwrap(), [0xc0]);
    assert_eq!(engine.serialize(&false).unwrap(), [0xc2]);
    assert_eq!(engine.serialize(&true).unwrap(), [0xc3]);
    assert!(engine.deserialize::<bool>(&[0xc3]).unwrap());
    engine.deserialize::<()>(&[0xc0]).unwrap();
}

#[test]
fn test_float_boundaries() {
    let engine = Mopack::new();
    for value in [0.0f32, 1.5, -2.25, f32::MAX, f32::MIN_POSITIVE] {
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(bytes.len(), 5);
        assert_eq!(bytes[0], 0xca);
        assert_eq!(engine.deserialize::<f32>(&bytes).unwrap(), value);
    }
    for value in [0.0f64, 1.5, -2.25, f64::MAX, f64::MIN_POSITIVE] {
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], 0xcb);
        assert_eq!(engine.deserialize::<f64>(&bytes).unwrap(), value);
    }
}

#[test]
fn test_string_length_boundaries() {
    let engine = Mopack::new();
    let test_data: Vec<(usize, usize)> = vec![
        // (byte length, header length)
        (0, 1),
        (31, 1),
        (32, 2),
        (255, 2),
        (256, 3),
        (65_535, 3),
        (65_536, 5),
    ];
    for &(len, header_len) in &test_data {
        let value = "x".repeat(len);
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(bytes.len(), header_len + len, "encoded length for len {len}");
        let back: String = engine.deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }
}

#[test]
fn test_binary_length_boundaries() {
    let engine = Mopack::new();
    let test_data: Vec<(usize, usize)> = vec![
        (0, 2),
        (255, 2),
        (256, 3),
        (65_535, 3),
        (65_536, 5),
    ];
    for &(len, header_len) in &test_data {
        let value = vec![0xabu8; len];
        let bytes = engine.serialize(&value).unwrap();
        assert_eq!(bytes.len(), header_len + len, "encoded length for len {len}");
        let back: Vec<u8> = engine.deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }
}

#[test]
fn test_array_count_boundaries() {
    let mut engine = Mopack::new();
    engine.register::<Vec<i64>, _>(VecFormatter::new(Arc::new(I64Formatter)));
    let test_data: Vec<(usize, usize)> = vec![
        // (element count, header length)
        (0, 1),
        (1, 1),
        (15, 1),
        (16, 3),
        (65_535, 3),
        (65_536, 5),
    ];
    for &(count, header_len) in &test_data {
        let value: Vec<i64> = vec![7; count];
        let bytes = engine.serialize(&value).unwrap();
        // each element 7 is a single positive fixint byte
        assert_eq!(bytes.len(), header_len + count, "encoded length for {count}");
        let back: Vec<i64> = engine.deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }
}

#[test]
fn test_map_count_boundaries() {
    let mut engine = Mopack::new();
    engine.register::<HashMap<u64, u64>, _>(MapFormatter::new(
        Arc::new(U64Formatter),
        Arc::new(U64Formatter),
    ));
    for count in [0usize, 1, 15, 16, 65_535, 65_536] {
        let value: HashMap<u64, u64> = (0..count as u64).map(|k| (k, k + 1)).collect();
        let bytes = engine.serialize(&value).unwrap();
        let expected_header = match count {
            0..=15 => 0x80 | count as u8,
            16..=65_535 => 0xde,
            _ => 0xdf,
        };
        assert_eq!(bytes[0], expected_header, "header for {count} pairs");
        let back: HashMap<u64, u64> = engine.deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }
}

#[test]
fn test_fixed_width_writers_keep_their_width() {
    use mopack::{wire, Writer};
    let mut writer = Writer::default();
    wire::write_fixed_i32(&mut writer, 1);
    assert_eq!(writer.as_slice(), [0xd2, 0x00, 0x00, 0x00, 0x01]);

    let mut writer = Writer::default();
    wire::write_fixed_u64(&mut writer, 1);
    assert_eq!(
        writer.as_slice(),
        [0xcf, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]
    );
}
