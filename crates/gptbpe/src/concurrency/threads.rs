//! # Thread Utilities

use core::hash::{Hash, Hasher};
use std::{env, hash::DefaultHasher, num::NonZeroUsize, thread};

/// Environment variables which size rayon's global pool, in priority order.
const RAYON_VARS: &[&str] = &["RAYON_NUM_THREADS", "RAYON_RS_NUM_CPUS"];

/// A hash of the current thread's id; stable for the life of the thread.
pub fn current_thread_id_hash() -> usize {
    let mut hasher = DefaultHasher::new();
    thread::current().id().hash(&mut hasher);
    hasher.finish() as usize
}

/// Estimate the available parallelism.
///
/// The first positive integer in [`RAYON_VARS`] wins; then
/// ``thread::available_parallelism()``; then 1.
pub fn est_max_parallelism() -> usize {
    RAYON_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .filter_map(|val| val.trim().parse::<usize>().ok())
        .find(|&n| n > 0)
        .or_else(|| thread::available_parallelism().ok().map(NonZeroUsize::get))
        .unwrap_or(1)
}

/// Resolve a pool size: ``min(max_size, est_max_parallelism())``.
pub fn resolve_pool_size(max_size: Option<NonZeroUsize>) -> usize {
    let parallelism = est_max_parallelism();
    max_size.map_or(parallelism, |n| n.get().min(parallelism))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_thread_id_hash() {
        assert_eq!(current_thread_id_hash(), current_thread_id_hash());

        let here = current_thread_id_hash();
        let there = thread::spawn(current_thread_id_hash).join().unwrap();
        assert_ne!(here, there);
    }

    #[test]
    #[serial]
    fn test_parallelism_env() {
        let saved: Vec<_> = RAYON_VARS
            .iter()
            .map(|&name| (name, env::var(name).ok()))
            .collect();
        for name in RAYON_VARS {
            unsafe { env::remove_var(name) };
        }

        let base = est_max_parallelism();
        assert!(base >= 1);
        assert_eq!(resolve_pool_size(None), base);

        for name in RAYON_VARS {
            unsafe { env::set_var(name, (base + 5).to_string()) };
            assert_eq!(est_max_parallelism(), base + 5);
            assert_eq!(resolve_pool_size(NonZeroUsize::new(2)), 2);
            assert_eq!(resolve_pool_size(NonZeroUsize::new(base + 100)), base + 5);
            unsafe { env::remove_var(name) };
        }

        // Zero and junk are skipped.
        unsafe {
            env::set_var(RAYON_VARS[0], "0");
            env::set_var(RAYON_VARS[1], "lots");
        }
        assert_eq!(est_max_parallelism(), base);

        for (name, val) in saved {
            match val {
                Some(s) => unsafe { env::set_var(name, s) },
                None => unsafe { env::remove_var(name) },
            }
        }
    }
}
