//! Durable local storage: the SQLite backend, the key/value trait over it and
//! the write-behind queue that feeds it.

pub mod db;
pub mod storage;
pub mod write_behind;

pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use write_behind::WriteBehindQueue;
