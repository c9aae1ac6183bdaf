//! Orchestration services for the shared file bucket.

mod bucket;

pub use bucket::{
    BucketService, BucketServiceError, BucketServiceResult, UploadBucketItemRequest,
};
