//! Domain model for the shared file bucket.

mod error;
mod file;
mod ids;
mod item;

pub use error::BucketDomainError;
pub use file::{FileRef, FileUpload};
pub use ids::BucketItemId;
pub use item::{BucketItem, PersistedBucketItemData};
