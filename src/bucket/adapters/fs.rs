//! Capability-sandboxed directory blob store.
//!
//! Stores uploads as flat files under a pre-opened [`Dir`], so the adapter
//! can never write outside the directory the composition root handed it.
//! Keys follow the `<millis>_<name>` shape the original bucket used for
//! its object keys.

use async_trait::async_trait;
use cap_std::fs_utf8::Dir;
use mockable::Clock;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::bucket::{
    domain::{FileRef, FileUpload},
    ports::{FileStorage, FileStorageError, FileStorageResult},
};

/// Blob store rooted at a capability-opened directory.
pub struct DirFileStorage<C> {
    root: Dir,
    clock: Arc<C>,
}

impl<C> DirFileStorage<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a blob store over an already-opened directory handle.
    #[must_use]
    pub const fn new(root: Dir, clock: Arc<C>) -> Self {
        Self { root, clock }
    }

    fn clone_root(&self) -> FileStorageResult<Dir> {
        self.root.try_clone().map_err(FileStorageError::backend)
    }
}

/// Replaces path-hostile characters so the key stays a flat file name.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '-'
            }
        })
        .collect()
}

#[async_trait]
impl<C> FileStorage for DirFileStorage<C>
where
    C: Clock + Send + Sync,
{
    async fn put(&self, upload: FileUpload) -> FileStorageResult<FileRef> {
        let key = format!(
            "{}_{}",
            self.clock.utc().timestamp_millis(),
            sanitize(upload.name())
        );
        let file = FileRef::new(&key, upload.content_type())
            .map_err(|err| FileStorageError::Rejected(err.to_string()))?;

        let dir = self.clone_root()?;
        let data = upload.into_data();
        tokio::task::spawn_blocking(move || dir.write(&key, &data))
            .await
            .map_err(FileStorageError::backend)?
            .map_err(FileStorageError::backend)?;
        Ok(file)
    }

    async fn remove(&self, file: &FileRef) -> FileStorageResult<()> {
        let dir = self.clone_root()?;
        let key = file.reference().to_owned();
        let outcome = tokio::task::spawn_blocking(move || dir.remove_file(&key))
            .await
            .map_err(FileStorageError::backend)?;
        match outcome {
            Ok(()) => Ok(()),
            // Removal is idempotent: a missing blob is not an error.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(FileStorageError::backend(err)),
        }
    }
}
