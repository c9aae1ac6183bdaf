//! In-memory adapters for the bucket.

mod item;
mod storage;

pub use item::InMemoryBucketRepository;
pub use storage::InMemoryFileStorage;
