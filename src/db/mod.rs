//! Backing store access for contract records.

mod memory;
mod redis;
mod store;

pub use memory::MemoryRecordStore;
pub use redis::RedisRecordStore;
pub use store::{FetchedRecords, RecordStore, StoreError};
