//! Typed CSV loading and the memoized load cache.

pub mod cache;
pub mod layout;
pub mod loader;
pub mod tables;
