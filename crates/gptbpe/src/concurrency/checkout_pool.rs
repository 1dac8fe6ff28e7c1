//! # Checkout Pool
//!
//! A pool of interchangeable, exclusively-held items.
//!
//! Unlike [`ThreadHashedPool`](super::ThreadHashedPool), which hands out
//! shared references, a [`CheckoutPool`] hands each caller sole ownership of
//! an item for the life of a [`PoolGuard`]. The guard returns the item on
//! drop, including during unwinding.

use core::{
    fmt::Debug,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::errors::BpeResult;

/// Item constructor for a [`CheckoutPool`].
pub type PoolFactory<T> = Box<dyn Fn() -> BpeResult<T> + Send + Sync>;

/// A lazily-filled pool of exclusively checked-out items.
///
/// ## Style Hints
///
/// Instance names should prefer `${T-name}_pool`,
/// for example, `scratch_pool`.
pub struct CheckoutPool<T: Send> {
    idle: Mutex<Vec<T>>,
    factory: PoolFactory<T>,
    max_idle: usize,
    created: AtomicUsize,
}

impl<T: Send> Debug for CheckoutPool<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("CheckoutPool")
            .field("idle", &self.idle_len())
            .field("max_idle", &self.max_idle)
            .field("created", &self.created())
            .finish()
    }
}

impl<T: Send> CheckoutPool<T> {
    /// Create a new pool.
    ///
    /// ## Arguments
    /// * `factory` - builds a new item when no idle item is available.
    /// * `max_idle` - the number of returned items retained for reuse;
    ///   items returned beyond this are dropped.
    pub fn new<F>(
        factory: F,
        max_idle: usize,
    ) -> Self
    where
        F: Fn() -> BpeResult<T> + Send + Sync + 'static,
    {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            factory: Box::new(factory),
            max_idle,
            created: AtomicUsize::new(0),
        }
    }

    /// Check out an item, constructing one if none are idle.
    ///
    /// A construction failure is returned to the caller; nothing is held
    /// by the pool on that path.
    pub fn checkout(&self) -> BpeResult<PoolGuard<'_, T>> {
        let reused = self.idle.lock().pop();
        let item = match reused {
            Some(item) => item,
            None => {
                let item = (self.factory)()?;
                self.created.fetch_add(1, Ordering::Relaxed);
                item
            }
        };

        Ok(PoolGuard {
            pool: self,
            item: Some(item),
        })
    }

    fn checkin(
        &self,
        item: T,
    ) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(item);
        }
    }

    /// The number of idle items.
    pub fn idle_len(&self) -> usize {
        self.idle.lock().len()
    }

    /// The maximum number of idle items retained.
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// The number of items the factory has successfully built.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

/// An exclusive handle to a checked-out item; returns it to the pool on drop.
pub struct PoolGuard<'a, T: Send> {
    pool: &'a CheckoutPool<T>,
    item: Option<T>,
}

impl<T: Send> Deref for PoolGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.item.as_ref().expect("PoolGuard item is present until drop")
    }
}

impl<T: Send> DerefMut for PoolGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.item.as_mut().expect("PoolGuard item is present until drop")
    }
}

impl<T: Send> Drop for PoolGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.checkin(item);
        }
    }
}
