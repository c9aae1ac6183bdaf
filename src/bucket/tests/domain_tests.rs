//! Domain-focused tests for file references and bucket items.

use crate::bucket::domain::{BucketDomainError, BucketItem, FileRef, FileUpload};
use crate::directory::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn file_ref() -> FileRef {
    FileRef::new("mem/report.pdf", "application/pdf").expect("valid file reference")
}

#[rstest]
fn file_ref_rejects_blank_reference() {
    let result = FileRef::new("   ", "application/pdf");
    assert_eq!(result, Err(BucketDomainError::EmptyReference));
}

#[rstest]
fn file_upload_trims_name_and_keeps_bytes() {
    let upload =
        FileUpload::new(vec![1, 2, 3], "  report.pdf  ", "application/pdf").expect("valid upload");
    assert_eq!(upload.name(), "report.pdf");
    assert_eq!(upload.data(), &[1, 2, 3]);
    assert_eq!(upload.into_data(), vec![1, 2, 3]);
}

#[rstest]
fn file_upload_rejects_blank_name() {
    let result = FileUpload::new(vec![1], "   ", "application/pdf");
    assert_eq!(result, Err(BucketDomainError::EmptyFileName));
}

#[rstest]
fn bucket_item_trims_name_and_normalizes_tags(clock: DefaultClock) {
    let item = BucketItem::new(
        "  Quarterly report  ",
        Some("Q2 figures".to_owned()),
        vec![
            " finance ".to_owned(),
            String::new(),
            "q2".to_owned(),
            "   ".to_owned(),
        ],
        UserId::new(),
        file_ref(),
        &clock,
    )
    .expect("valid bucket item");

    assert_eq!(item.name(), "Quarterly report");
    assert_eq!(item.description(), Some("Q2 figures"));
    assert_eq!(item.tags(), ["finance".to_owned(), "q2".to_owned()]);
    assert_eq!(item.created_at(), item.updated_at());
}

#[rstest]
fn bucket_item_rejects_blank_name(clock: DefaultClock) {
    let result = BucketItem::new("   ", None, Vec::new(), UserId::new(), file_ref(), &clock);
    assert_eq!(result, Err(BucketDomainError::EmptyItemName));
}
