use std::path::Path;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream};
use futures::future::BoxFuture;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::{adapters, model::error::FetchError, util};

pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Resolves credentials and region through the SDK's default provider chain.
    pub async fn load_sdk_config(region: Option<String>) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }

        loader.load().await
    }

    pub fn new(config: &SdkConfig, endpoint_url: Option<&str>) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(config);

        // S3-compatible providers are addressed path-style against their own endpoint.
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
        }
    }
}

impl adapters::ObjectStore for S3Store {
    fn list_buckets(&self) -> BoxFuture<'_, Result<Vec<String>, FetchError>> {
        Box::pin(async move {
            let lb = self
                .client
                .list_buckets()
                .send()
                .await
                .map_err(|err| FetchError::provider("list_buckets", DisplayErrorContext(&err)))?;

            Ok(lb
                .buckets()
                .iter()
                .filter_map(|b| b.name().map(|name| name.to_string()))
                .collect())
        })
    }

    fn list_objects<'a>(
        &'a self,
        bucket: &'a str,
        continuation_token: Option<&'a str>,
    ) -> BoxFuture<'a, Result<adapters::ObjectPage, FetchError>> {
        Box::pin(async move {
            let mut req = self.client.list_objects_v2().bucket(bucket);

            if let Some(tok) = continuation_token {
                req = req.continuation_token(tok);
            }

            let lo = req.send().await.map_err(|err| {
                FetchError::provider(format!("list_objects at: {}", bucket), DisplayErrorContext(&err))
            })?;

            let keys = lo
                .contents()
                .iter()
                .filter_map(|o| o.key().map(|key| key.to_string()))
                .collect();

            Ok(adapters::ObjectPage {
                keys,
                next_token: lo.next_continuation_token().map(|tok| tok.to_string()),
            })
        })
    }

    fn download_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        dest: &'a Path,
    ) -> BoxFuture<'a, Result<u64, FetchError>> {
        Box::pin(async move {
            let o = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|err| {
                    FetchError::provider(format!("get_object: {}", key), DisplayErrorContext(&err))
                })?;

            let partial = util::object::partial_path(dest);
            let res = write_body(o.body, key, &partial).await;

            adapters::commit_download(&partial, dest, res).await
        })
    }
}

async fn write_body(mut body: ByteStream, key: &str, path: &Path) -> Result<u64, FetchError> {
    let mut file = File::create(path)
        .await
        .map_err(|err| FetchError::io(path, err))?;

    let mut written = 0u64;
    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(|err| FetchError::provider(format!("collect body: {}", key), err))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|err| FetchError::io(path, err))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|err| FetchError::io(path, err))?;

    Ok(written)
}
