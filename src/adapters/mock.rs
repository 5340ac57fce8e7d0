use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use futures::future::{self, BoxFuture};

use crate::{adapters, model::error::FetchError, util};

/// In-memory provider with a fixed listing order.
#[derive(Default)]
pub struct MockClient {
    pub buckets: Vec<String>,
    pub objects: Vec<(String, Vec<u8>)>,
    /// Keys per listing page; `0` serves everything in one page.
    pub page_size: usize,
    pub fail_list_buckets: bool,
    /// Fails the request for this key before any body is read.
    pub fail_download: Option<String>,
    /// Fails the download of this key after half of its body was written.
    pub fail_mid_body: Option<String>,
    calls: AtomicUsize,
    pages: AtomicUsize,
}

impl MockClient {
    pub fn new(buckets: &[&str], objects: &[(&str, &str)]) -> Self {
        Self {
            buckets: buckets.iter().map(|b| b.to_string()).collect(),
            objects: objects
                .iter()
                .map(|(key, body)| (key.to_string(), body.as_bytes().to_vec()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn pages(&self) -> usize {
        self.pages.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl adapters::ObjectStore for MockClient {
    fn list_buckets(&self) -> BoxFuture<'_, Result<Vec<String>, FetchError>> {
        self.record_call();

        if self.fail_list_buckets {
            return Box::pin(future::ready(Err(FetchError::provider(
                "list_buckets",
                "access denied",
            ))));
        }

        Box::pin(future::ready(Ok(self.buckets.clone())))
    }

    fn list_objects<'a>(
        &'a self,
        bucket: &'a str,
        continuation_token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<adapters::ObjectPage, FetchError>> {
        self.record_call();
        self.pages.fetch_add(1, Ordering::SeqCst);

        let start = match continuation_token.map(|tok| tok.parse::<usize>()) {
            None => 0,
            Some(Ok(start)) => start,
            Some(Err(err)) => {
                return Box::pin(future::ready(Err(FetchError::provider(
                    format!("list_objects at: {}", bucket),
                    err,
                ))))
            }
        };

        let end = if self.page_size == 0 {
            self.objects.len()
        } else {
            (start + self.page_size).min(self.objects.len())
        };

        let keys = self.objects[start.min(end)..end]
            .iter()
            .map(|(key, _)| key.clone())
            .collect();
        let next_token = (end < self.objects.len()).then(|| end.to_string());

        Box::pin(future::ready(Ok(adapters::ObjectPage { keys, next_token })))
    }

    fn download_object<'a>(
        &'a self,
        _bucket: &'a str,
        key: &'a str,
        dest: &'a Path,
    ) -> BoxFuture<'a, Result<u64, FetchError>> {
        self.record_call();

        Box::pin(async move {
            if self.fail_download.as_deref() == Some(key) {
                return Err(FetchError::provider(
                    format!("get_object: {}", key),
                    "connection reset",
                ));
            }

            let body = self
                .objects
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, body)| body.clone())
                .ok_or_else(|| FetchError::provider(format!("get_object: {}", key), "NoSuchKey"))?;

            let partial = util::object::partial_path(dest);
            let res = if self.fail_mid_body.as_deref() == Some(key) {
                match tokio::fs::write(&partial, &body[..body.len() / 2]).await {
                    Ok(()) => Err(FetchError::provider(
                        format!("collect body: {}", key),
                        "connection reset",
                    )),
                    Err(err) => Err(FetchError::io(&partial, err)),
                }
            } else {
                tokio::fs::write(&partial, &body)
                    .await
                    .map(|()| body.len() as u64)
                    .map_err(|err| FetchError::io(&partial, err))
            };

            adapters::commit_download(&partial, dest, res).await
        })
    }
}
