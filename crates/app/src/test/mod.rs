//! Test doubles for the persistence boundary.

mod memory;

pub(crate) use memory::{MemoryLocalStorage, MemoryRowStore};
