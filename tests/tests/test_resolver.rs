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

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mopack::{
    wire, CollectionDeserializeMode, CompositeResolver, Config, Error, Formatter,
    FormatterRegistry, FormatterResolver, I64Formatter, MapFormatter, Mopack, Reader, ResolverExt,
    VecFormatter, Writer,
};

/// A marker type only some registries know about.
struct Token(u8);

/// Encodes a `Token` as a single fixint carrying `brand`.
struct TokenFormatter {
    brand: u8,
}

impl Formatter<Token> for TokenFormatter {
    fn write(&self, writer: &mut Writer, _value: &Token) -> Result<(), Error> {
        wire::write_uint(writer, self.brand as u64);
        Ok(())
    }

    fn read(&self, reader: &mut Reader<'_>) -> Result<Token, Error> {
        Ok(Token(wire::read_uint(reader)? as u8))
    }
}

/// Counts how often a child resolver is queried.
struct Counting {
    inner: FormatterRegistry,
    queries: AtomicUsize,
}

impl Counting {
    fn new(inner: FormatterRegistry) -> Arc<Counting> {
        Arc::new(Counting {
            inner,
            queries: AtomicUsize::new(0),
        })
    }
}

impl FormatterResolver for Counting {
    fn resolve_any(&self, type_id: TypeId) -> Option<mopack::Slot> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_any(type_id)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

#[test]
fn test_first_child_with_a_formatter_wins() {
    let without = FormatterRegistry::builder("without").build();
    let with_brand_1 = FormatterRegistry::builder("brand-1")
        .register::<Token, _>(TokenFormatter { brand: 1 })
        .build();
    let with_brand_2 = FormatterRegistry::builder("brand-2")
        .register::<Token, _>(TokenFormatter { brand: 2 })
        .build();

    let composite = CompositeResolver::new(vec![
        Arc::new(without),
        Arc::new(with_brand_1),
        Arc::new(with_brand_2),
    ]);
    let formatter = composite.resolve::<Token>().unwrap();
    let mut writer = Writer::default();
    formatter.write(&mut writer, &Token(0)).unwrap();
    // brand-1 sits before brand-2 in the chain
    assert_eq!(writer.as_slice(), [0x01]);
}

#[test]
fn test_composite_caches_hits_and_misses() {
    let empty = Counting::new(FormatterRegistry::builder("empty").build());
    let with_token = Counting::new(
        FormatterRegistry::builder("with-token")
            .register::<Token, _>(TokenFormatter { brand: 7 })
            .build(),
    );
    let children: Vec<Arc<dyn FormatterResolver>> = vec![
        Arc::clone(&empty) as Arc<dyn FormatterResolver>,
        Arc::clone(&with_token) as Arc<dyn FormatterResolver>,
    ];
    let composite = CompositeResolver::new(children);

    assert!(composite.resolve::<Token>().is_some());
    let empty_queries = empty.queries.load(Ordering::SeqCst);
    let token_queries = with_token.queries.load(Ordering::SeqCst);
    assert!(composite.resolve::<Token>().is_some());
    assert_eq!(empty.queries.load(Ordering::SeqCst), empty_queries);
    assert_eq!(with_token.queries.load(Ordering::SeqCst), token_queries);

    // misses are cached too
    assert!(composite.resolve::<String>().is_none());
    let empty_queries = empty.queries.load(Ordering::SeqCst);
    assert!(composite.resolve::<String>().is_none());
    assert_eq!(empty.queries.load(Ordering::SeqCst), empty_queries);
}

#[test]
fn test_resolution_failure_names_type_and_resolver() {
    let composite = CompositeResolver::new(vec![]);
    match composite.resolve_required::<Token>() {
        Err(Error::ResolutionFailed {
            type_name,
            resolver,
        }) => {
            assert!(type_name.contains("Token"));
            assert_eq!(resolver, "composite");
        }
        other => panic!("expected ResolutionFailed, got {:?}", other.err()),
    }
}

#[test]
fn test_dynamic_lookup_by_type_id() {
    let registry = FormatterRegistry::standard();
    assert!(registry.resolve_any(TypeId::of::<i64>()).is_some());
    assert!(registry.resolve_any(TypeId::of::<Token>()).is_none());
}

#[test]
fn test_collection_mode_resolves_with_a_default() {
    let engine = Mopack::new();
    let mode = engine
        .resolver()
        .resolve_value::<CollectionDeserializeMode>()
        .map(|m| *m);
    assert_eq!(mode, Some(CollectionDeserializeMode::OverwriteReplace));
}

#[test]
fn test_deserialize_into_overwrite_replace() {
    let mut engine = Mopack::new();
    engine.register::<Vec<i64>, _>(VecFormatter::new(Arc::new(I64Formatter)));

    let bytes = engine.serialize(&vec![1i64, 2]).unwrap();
    let mut target = vec![9i64, 9, 9];
    engine.deserialize_into(&bytes, &mut target).unwrap();
    assert_eq!(target, [1, 2]);
}

#[test]
fn test_deserialize_into_add_merges() {
    let mut engine =
        Mopack::new().with_config(Config::new().collection_deserialize_mode(CollectionDeserializeMode::Add));
    engine.register::<Vec<i64>, _>(VecFormatter::new(Arc::new(I64Formatter)));
    engine.register::<HashMap<i64, i64>, _>(MapFormatter::new(
        Arc::new(I64Formatter),
        Arc::new(I64Formatter),
    ));

    let bytes = engine.serialize(&vec![1i64, 2]).unwrap();
    let mut target = vec![9i64];
    engine.deserialize_into(&bytes, &mut target).unwrap();
    assert_eq!(target, [9, 1, 2]);

    let mut map: HashMap<i64, i64> = [(1, 10), (2, 20)].into_iter().collect();
    let update: HashMap<i64, i64> = [(2, 99), (3, 30)].into_iter().collect();
    let bytes = engine.serialize(&update).unwrap();
    engine.deserialize_into(&bytes, &mut map).unwrap();
    assert_eq!(map.len(), 3);
    // decoded entries win per key, untouched keys survive
    assert_eq!(map[&1], 10);
    assert_eq!(map[&2], 99);
    assert_eq!(map[&3], 30);
}

#[test]
fn test_engine_registration_shadows_the_standard_formatter() {
    let mut engine = Mopack::new();
    // i64 normally encodes smallest-form; shadow it with the fixed form
    engine.register::<i64, _>(mopack::FixedI64Formatter);
    let bytes = engine.serialize(&1i64).unwrap();
    assert_eq!(bytes.len(), 9);
    assert_eq!(bytes[0], 0xd3);
    assert_eq!(engine.deserialize::<i64>(&bytes).unwrap(), 1);
}
