use std::path::Path;

use futures::future::BoxFuture;

use crate::model::error::FetchError;

#[cfg(test)]
pub mod mock;
pub mod s3;

/// One listing request's worth of object keys, in provider order.
#[derive(Debug, Default)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
}

/// Read-only view of an object-storage provider.
pub trait ObjectStore: Send + Sync {
    fn list_buckets(&self) -> BoxFuture<'_, Result<Vec<String>, FetchError>>;

    /// Lists the page of keys starting at `continuation_token`, or the first
    /// page when it is `None`.
    fn list_objects<'a>(
        &'a self,
        bucket: &'a str,
        continuation_token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ObjectPage, FetchError>>;

    /// Writes the object body to `dest`, replacing any existing file, and
    /// returns the number of bytes written. `dest` is only touched once the
    /// whole body has arrived.
    fn download_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        dest: &'a Path,
    ) -> BoxFuture<'a, Result<u64, FetchError>>;
}

/// Moves a fully written `partial` over `dest`, or discards it if the
/// download failed.
pub async fn commit_download(
    partial: &Path,
    dest: &Path,
    res: Result<u64, FetchError>,
) -> Result<u64, FetchError> {
    match res {
        Ok(written) => {
            tokio::fs::rename(partial, dest)
                .await
                .map_err(|err| FetchError::io(dest, err))?;
            Ok(written)
        }
        Err(err) => {
            let _ = tokio::fs::remove_file(partial).await;
            Err(err)
        }
    }
}
