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

//! Bounded reuse pools.
//!
//! [`Pool`] loans out values through RAII [`Rental`] handles: renting pops
//! from a mutex-guarded free list or builds a fresh value, dropping the
//! rental resets the value and pushes it back unless the free list is
//! already at `max_size`. The pool invariants — an instance is never in the
//! free list twice, never loaned out twice — hold by construction: the
//! `Rental` owns the value while loaned, and only its `Drop` returns it.
//!
//! [`BufferPool`] specializes the same machinery for growable byte buffers:
//! a minimum segment size keeps fresh buffers out of the tiny-reallocation
//! regime, and the reset keeps capacity while clearing length, so a
//! warmed-up pool serves reads and writes allocation-free.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, OnceLock};

use bytes::BytesMut;
use parking_lot::Mutex;

struct PoolInner<T> {
    free: Mutex<Vec<T>>,
    max_size: usize,
    factory: Box<dyn Fn() -> T + Send + Sync>,
    reset: Option<Box<dyn Fn(&mut T) + Send + Sync>>,
}

impl<T> PoolInner<T> {
    fn put_back(&self, mut value: T) {
        if let Some(reset) = &self.reset {
            reset(&mut value);
        }
        let mut free = self.free.lock();
        if free.len() < self.max_size {
            free.push(value);
        }
        // else: drop the value; the pool is full
    }
}

/// A bounded, thread-safe pool of reusable values.
///
/// `Pool` is a cheap handle; clones share the same free list.
pub struct Pool<T> {
    inner: Arc<PoolInner<T>>,
}

impl<T> Clone for Pool<T> {
    fn clone(&self) -> Self {
        Pool {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Pool<T> {
    /// Creates a pool that retains at most `max_size` returned values.
    pub fn new<F>(max_size: usize, factory: F) -> Pool<T>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Pool {
            inner: Arc::new(PoolInner {
                free: Mutex::new(Vec::new()),
                max_size,
                factory: Box::new(factory),
                reset: None,
            }),
        }
    }

    /// Like [`Pool::new`], with a reset run exactly once on each returned
    /// value before it re-enters the free list.
    pub fn with_reset<F, R>(max_size: usize, factory: F, reset: R) -> Pool<T>
    where
        F: Fn() -> T + Send + Sync + 'static,
        R: Fn(&mut T) + Send + Sync + 'static,
    {
        Pool {
            inner: Arc::new(PoolInner {
                free: Mutex::new(Vec::new()),
                max_size,
                factory: Box::new(factory),
                reset: Some(Box::new(reset)),
            }),
        }
    }

    /// Rents a value: a previously-returned one when the free list is
    /// non-empty, else a freshly-built one. Never fails.
    ///
    /// The factory runs outside the lock; the lock only guards the
    /// free-list pop.
    pub fn rent(&self) -> Rental<T> {
        let pooled = self.inner.free.lock().pop();
        let value = pooled.unwrap_or_else(|| (self.inner.factory)());
        Rental {
            value: Some(value),
            pool: Arc::clone(&self.inner),
        }
    }

    /// Number of values currently idle in the free list.
    pub fn idle(&self) -> usize {
        self.inner.free.lock().len()
    }

    pub fn max_size(&self) -> usize {
        self.inner.max_size
    }
}

/// A scoped, exclusive loan of a pooled value.
///
/// Dereferences to the value; returning happens on drop.
pub struct Rental<T> {
    value: Option<T>,
    pool: Arc<PoolInner<T>>,
}

impl<T> Deref for Rental<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // invariant: Some until Drop takes it
        self.value.as_ref().unwrap()
    }
}

impl<T> DerefMut for Rental<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().unwrap()
    }
}

impl<T> Drop for Rental<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.put_back(value);
        }
    }
}

/// Default minimum segment size for pooled byte buffers.
pub const MIN_SEGMENT_SIZE: usize = 4096;

/// A bounded pool of growable byte buffers.
///
/// The configured segment size is floored at [`MIN_SEGMENT_SIZE`];
/// returned buffers keep their capacity and only reset their length.
pub struct BufferPool {
    pool: Pool<BytesMut>,
    segment_size: usize,
}

impl BufferPool {
    pub fn new(max_size: usize, segment_size: usize) -> BufferPool {
        let segment_size = segment_size.max(MIN_SEGMENT_SIZE);
        BufferPool {
            pool: Pool::with_reset(
                max_size,
                move || BytesMut::with_capacity(segment_size),
                |buffer| buffer.clear(),
            ),
            segment_size,
        }
    }

    pub fn rent(&self) -> Rental<BytesMut> {
        self.pool.rent()
    }

    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    pub fn idle(&self) -> usize {
        self.pool.idle()
    }

    /// The process-wide default pool, used by streaming readers that are
    /// not handed an explicit one.
    pub fn global() -> &'static BufferPool {
        static GLOBAL: OnceLock<BufferPool> = OnceLock::new();
        GLOBAL.get_or_init(|| BufferPool::new(8, MIN_SEGMENT_SIZE))
    }
}
