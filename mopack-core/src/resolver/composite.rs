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
use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use crate::resolver::{FormatterResolver, NoopObserver, ResolveObserver, Slot};

/// An ordered chain of resolvers with a per-type cache.
///
/// Per type, the first child with a non-missing answer wins. The answer —
/// including a miss — is cached, so a second resolution for the same type
/// never re-queries the children. The child list is fixed at construction;
/// the cache is the only mutable state and is append-only, with the
/// insert-if-absent probe serializing racing first resolutions so a
/// formatter slot is published exactly once per type.
pub struct CompositeResolver {
    children: Vec<Arc<dyn FormatterResolver>>,
    cache: DashMap<TypeId, Option<Slot>>,
    observer: Arc<dyn ResolveObserver>,
}

impl CompositeResolver {
    pub fn new(children: Vec<Arc<dyn FormatterResolver>>) -> CompositeResolver {
        CompositeResolver {
            children,
            cache: DashMap::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replaces the no-op resolution observer.
    pub fn with_observer(mut self, observer: Arc<dyn ResolveObserver>) -> CompositeResolver {
        self.observer = observer;
        self
    }

    fn resolve_uncached(&self, type_id: TypeId) -> Option<Slot> {
        self.observer.resolve_started(type_id);
        let mut found = None;
        for child in &self.children {
            if let Some(slot) = child.resolve_any(type_id) {
                trace!(?type_id, child = child.name(), "formatter resolved");
                found = Some(slot);
                break;
            }
        }
        if found.is_none() {
            trace!(?type_id, "no child resolver has a formatter");
        }
        self.observer.resolve_finished(type_id, found.is_some());
        found
    }
}

impl FormatterResolver for CompositeResolver {
    fn resolve_any(&self, type_id: TypeId) -> Option<Slot> {
        if let Some(cached) = self.cache.get(&type_id) {
            return cached.value().clone();
        }
        self.cache
            .entry(type_id)
            .or_insert_with(|| self.resolve_uncached(type_id))
            .value()
            .clone()
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}
