//! # Thread-Hashed Pool

use core::{fmt::Debug, ops::Deref};
use std::num::NonZeroUsize;

use crate::concurrency::threads::{current_thread_id_hash, resolve_pool_size};

/// A fixed set of interchangeable clones, read by reference.
///
/// The current thread's id hash picks the clone it reads; a thread always
/// reads the same one. Compiled regex keep internal match caches, and this
/// spreads concurrent readers across several of them.
///
/// Derefs to the current thread's clone.
#[derive(Clone)]
pub struct ThreadHashedPool<T: Send + Sync> {
    items: Box<[T]>,
}

impl<T: Clone + Send + Sync> ThreadHashedPool<T> {
    /// Build a pool of clones of `item`.
    ///
    /// ## Arguments
    /// * `item` - the item to clone.
    /// * `max_size` - cap on the number of clones, see [`resolve_pool_size`].
    pub fn new(
        item: T,
        max_size: Option<NonZeroUsize>,
    ) -> Self {
        let size = resolve_pool_size(max_size);
        Self {
            items: std::iter::repeat_n(item, size).collect(),
        }
    }
}

impl<T: Send + Sync> ThreadHashedPool<T> {
    /// The clone for the current thread.
    pub fn get(&self) -> &T {
        &self.items[current_thread_id_hash() % self.items.len()]
    }

    /// The number of clones.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Send + Sync> Deref for ThreadHashedPool<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: Send + Sync + Debug> Debug for ThreadHashedPool<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ThreadHashedPool")
            .field("item", &self.items[0])
            .field("len", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn test_clones() {
        let max_size = NonZeroUsize::new(64);
        let pool = ThreadHashedPool::new(7_u32, max_size);

        let size = resolve_pool_size(max_size);
        assert_eq!(pool.len(), size);
        assert!(pool.items.iter().all(|&x| x == 7));
        assert_eq!(*pool, 7);

        assert_eq!(
            format!("{pool:?}"),
            format!("ThreadHashedPool {{ item: 7, len: {size} }}")
        );
    }

    #[test]
    fn test_same_clone_per_thread() {
        let pool = Arc::new(ThreadHashedPool::new(
            String::from("x"),
            NonZeroUsize::new(4),
        ));
        assert!(core::ptr::eq(pool.get(), pool.get()));

        let other = pool.clone();
        let addr = thread::spawn(move || {
            let a = other.get() as *const String as usize;
            let b = other.get() as *const String as usize;
            assert_eq!(a, b);
            a
        })
        .join()
        .unwrap();
        let base = pool.items.as_ptr() as usize;
        assert!(addr >= base);
        assert!(addr < base + pool.len() * size_of::<String>());
    }
}
