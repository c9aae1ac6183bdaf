//! In-memory integration tests for bucket uploads and deletion.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskboard::bucket::{
    adapters::memory::{InMemoryBucketRepository, InMemoryFileStorage},
    services::{BucketService, BucketServiceError, UploadBucketItemRequest},
};
use taskboard::directory::domain::UserId;

type TestService = BucketService<InMemoryBucketRepository, InMemoryFileStorage, DefaultClock>;

struct Bucket {
    service: TestService,
    storage: Arc<InMemoryFileStorage>,
}

#[fixture]
fn bucket() -> Bucket {
    let storage = Arc::new(InMemoryFileStorage::new());
    Bucket {
        service: BucketService::new(
            Arc::new(InMemoryBucketRepository::new()),
            Arc::clone(&storage),
            Arc::new(DefaultClock),
        ),
        storage,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploaded_item_is_listed_and_retrievable(bucket: Bucket) -> Result<(), eyre::Report> {
    let uploader = UserId::new();
    let item = bucket
        .service
        .upload(
            UploadBucketItemRequest::new(
                "Onboarding checklist",
                uploader,
                "checklist.md",
                "text/markdown",
                b"# Week one".to_vec(),
            )
            .with_tags(["onboarding".to_owned()]),
        )
        .await
        .expect("upload should succeed");

    eyre::ensure!(item.uploaded_by() == uploader, "uploader recorded");
    let bytes = bucket
        .storage
        .bytes_of(item.file())
        .expect("blob lookup should succeed");
    eyre::ensure!(bytes == Some(b"# Week one".to_vec()), "bytes stored verbatim");

    let listed = bucket
        .service
        .list_all()
        .await
        .expect("listing should succeed");
    eyre::ensure!(listed.len() == 1, "one item listed");
    let fetched = bucket
        .service
        .get(item.id())
        .await
        .expect("lookup should succeed");
    eyre::ensure!(fetched == item, "lookup returns the uploaded item");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_item_removes_record_and_blob(bucket: Bucket) {
    let item = bucket
        .service
        .upload(UploadBucketItemRequest::new(
            "Onboarding checklist",
            UserId::new(),
            "checklist.md",
            "text/markdown",
            b"# Week one".to_vec(),
        ))
        .await
        .expect("upload should succeed");

    bucket
        .service
        .delete(item.id())
        .await
        .expect("delete should succeed");

    assert!(bucket.storage.is_empty().expect("storage introspection"));
    let result = bucket.service.get(item.id()).await;
    assert!(matches!(result, Err(BucketServiceError::UnknownItem(_))));
}
