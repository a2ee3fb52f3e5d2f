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

//! Codec resolution: looking up the formatter for a type.
//!
//! The object-safe entry point is [`FormatterResolver::resolve_any`], keyed
//! by runtime [`TypeId`] — the bridging path for generic code, strictly
//! less convenient than the typed wrappers. Everyday callers use the
//! [`ResolverExt`] extension methods: `resolve::<T>()` for an optional hit
//! and `resolve_required::<T>()`, which turns a miss into a
//! [`ResolutionFailed`] error naming both the type and the resolver.
//!
//! Resolvers compose: a [`CompositeResolver`] chains children in order and
//! caches the first non-missing answer per type, so repeated resolution is
//! one concurrent map probe.
//!
//! A slot is type-erased as `Arc<dyn Any>` holding an
//! `Arc<dyn Formatter<T>>` — or a plain `Arc<V>` for configuration values
//! like [`CollectionDeserializeMode`], which travel through the same
//! mechanism (see [`ResolverExt::resolve_value`]).
//!
//! [`ResolutionFailed`]: crate::error::Error::ResolutionFailed
//! [`CollectionDeserializeMode`]: crate::config::CollectionDeserializeMode

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::error::Error;
use crate::formatter::Formatter;

mod composite;
mod registry;

pub use self::composite::CompositeResolver;
pub use self::registry::{FormatterRegistry, FormatterRegistryBuilder};

/// A type-erased resolution result.
///
/// Holds either an `Arc<dyn Formatter<T>>` or an `Arc<V>` for a
/// configuration value; [`ResolverExt`] recovers the concrete type.
pub type Slot = Arc<dyn Any + Send + Sync>;

/// A lookup service mapping a type to its formatter.
///
/// Implementations must be immutable once shared: the composite cache
/// relies on a child never changing its answer for a type.
pub trait FormatterResolver: Send + Sync {
    /// Resolves by runtime type identity. `None` means "missing", not an
    /// error; [`ResolverExt::resolve_required`] is the verifying wrapper.
    fn resolve_any(&self, type_id: TypeId) -> Option<Slot>;

    /// Identifies this resolver in diagnostics.
    fn name(&self) -> &'static str;
}

/// Typed convenience over [`FormatterResolver`], available on every
/// resolver including trait objects.
pub trait ResolverExt: FormatterResolver {
    /// Resolves the formatter for `T`, or `None` when missing.
    fn resolve<T: 'static>(&self) -> Option<Arc<dyn Formatter<T>>> {
        self.resolve_any(TypeId::of::<T>())?
            .downcast_ref::<Arc<dyn Formatter<T>>>()
            .cloned()
    }

    /// Resolves the formatter for `T`, failing with a descriptive error
    /// naming the type and this resolver when missing.
    fn resolve_required<T: 'static>(&self) -> Result<Arc<dyn Formatter<T>>, Error> {
        self.resolve::<T>()
            .ok_or_else(|| Error::resolution_failed(std::any::type_name::<T>(), self.name()))
    }

    /// Resolves a plain configuration value registered by its type.
    fn resolve_value<V: Send + Sync + 'static>(&self) -> Option<Arc<V>> {
        self.resolve_any(TypeId::of::<V>())?
            .downcast_ref::<Arc<V>>()
            .cloned()
    }
}

impl<R: FormatterResolver + ?Sized> ResolverExt for R {}

/// Observer invoked around first-time resolution in a composite.
///
/// All hooks are no-ops by default; implement what you need. Cached hits
/// do not fire the observer.
pub trait ResolveObserver: Send + Sync {
    fn resolve_started(&self, type_id: TypeId) {
        let _ = type_id;
    }

    fn resolve_finished(&self, type_id: TypeId, resolved: bool) {
        let _ = (type_id, resolved);
    }
}

/// The default do-nothing observer.
pub struct NoopObserver;

impl ResolveObserver for NoopObserver {}

pub(crate) fn formatter_slot<T: 'static>(formatter: Arc<dyn Formatter<T>>) -> Slot {
    Arc::new(formatter)
}

pub(crate) fn value_slot<V: Send + Sync + 'static>(value: V) -> Slot {
    Arc::new(Arc::new(value))
}
