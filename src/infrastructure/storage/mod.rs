//! Non-database post stores

mod memory;

pub use memory::{InMemoryPostStore, InMemoryPostTx};
