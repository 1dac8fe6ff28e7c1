//! # Concurrency Utilities
//!
//! * [`ThreadHashedPool`] - shared clones, picked by thread (regex).
//! * [`CheckoutPool`] - exclusively checked-out items (scratch buffers).

pub mod checkout_pool;
pub mod threads;

mod thread_hashed_pool;

#[doc(inline)]
pub use checkout_pool::{CheckoutPool, PoolGuard};
#[doc(inline)]
pub use thread_hashed_pool::ThreadHashedPool;
