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
use mopack::{Error, Ext, Mopack, Value};

#[test]
fn test_value_tree_round_trip() {
    let engine = Mopack::new();
    let tree = Value::Map(vec![
        (Value::Str("nil".into()), Value::Nil),
        (Value::Str("flag".into()), Value::Bool(true)),
        (Value::Str("neg".into()), Value::Int(-70_000)),
        (Value::Str("big".into()), Value::UInt(u64::MAX)),
        (Value::Str("pi32".into()), Value::F32(3.5)),
        (Value::Str("pi64".into()), Value::F64(-0.125)),
        (Value::Str("blob".into()), Value::Bin(vec![0, 1, 2])),
        (
            Value::Str("nested".into()),
            Value::Array(vec![
                Value::Int(1),
                Value::Array(vec![Value::Str("deep".into())]),
                Value::Map(vec![(Value::Int(1), Value::Int(2))]),
            ]),
        ),
        (
            Value::Str("ext".into()),
            Value::Ext(Ext::new(9, Bytes::from_static(&[1, 2, 3, 4, 5]))),
        ),
        // non-string keys are legal in MessagePack maps
        (Value::Array(vec![Value::Int(1)]), Value::Bool(false)),
    ]);
    let bytes = engine.serialize(&tree).unwrap();
    let back: Value = engine.deserialize(&bytes).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_value_map_preserves_wire_pair_order() {
    let engine = Mopack::new();
    let pairs = vec![
        (Value::Str("z".into()), Value::Int(1)),
        (Value::Str("a".into()), Value::Int(2)),
        (Value::Str("m".into()), Value::Int(3)),
    ];
    let bytes = engine.serialize(&Value::Map(pairs.clone())).unwrap();
    match engine.deserialize::<Value>(&bytes).unwrap() {
        Value::Map(decoded) => assert_eq!(decoded, pairs),
        other => panic!("expected a map, got {other:?}"),
    }
}

#[test]
fn test_integer_identity_is_by_value() {
    // a small UInt encodes as a positive fixint and decodes as Int;
    // equality must still hold
    let engine = Mopack::new();
    let bytes = engine.serialize(&Value::UInt(5)).unwrap();
    assert_eq!(bytes, [0x05]);
    let back: Value = engine.deserialize(&bytes).unwrap();
    assert_eq!(back, Value::UInt(5));
    assert_eq!(back, Value::Int(5));
    assert_ne!(Value::Int(-1), Value::UInt(u64::MAX));
}

#[test]
fn test_uint_forms_decode_as_uint() {
    let engine = Mopack::new();
    let bytes = engine.serialize(&Value::UInt(u64::MAX)).unwrap();
    match engine.deserialize::<Value>(&bytes).unwrap() {
        Value::UInt(v) => assert_eq!(v, u64::MAX),
        other => panic!("expected UInt, got {other:?}"),
    }
}

#[test]
fn test_hostile_nesting_hits_the_depth_limit() {
    // 200 nested single-element arrays around a nil
    let mut bytes = vec![0x91u8; 200];
    bytes.push(0xc0);
    let engine = Mopack::new();
    match engine.deserialize::<Value>(&bytes) {
        Err(Error::DepthExceeded(_)) => {}
        other => panic!("expected DepthExceeded, got {:?}", other.err()),
    }
}

#[test]
fn test_reasonable_nesting_is_fine() {
    let engine = Mopack::new();
    let mut tree = Value::Int(1);
    for _ in 0..100 {
        tree = Value::Array(vec![tree]);
    }
    let bytes = engine.serialize(&tree).unwrap();
    assert_eq!(engine.deserialize::<Value>(&bytes).unwrap(), tree);
}
