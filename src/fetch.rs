use std::{
    future::Future,
    path::{Path, PathBuf},
};

use crate::{
    adapters::ObjectStore,
    config::{Config, Settings},
    model::{category::Category, error::FetchError},
    report::Reporter,
    util,
};

/// What a successful run left on disk.
#[derive(Debug, Default)]
pub struct Summary {
    pub files: Vec<PathBuf>,
    pub bytes: u64,
}

pub struct Fetcher<'a> {
    pub client: &'a dyn ObjectStore,
    pub reporter: &'a dyn Reporter,
}

impl<'a> Fetcher<'a> {
    pub fn new(client: &'a dyn ObjectStore, reporter: &'a dyn Reporter) -> Self {
        Self { client, reporter }
    }

    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool, FetchError> {
        let bucket_names = self.client.list_buckets().await?;
        self.reporter.debug(&format!("{:?}", bucket_names));

        Ok(bucket_names.iter().any(|name| name == bucket))
    }

    /// Every key in `bucket`, following continuation tokens until the
    /// provider reports no further page.
    pub async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, FetchError> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects(bucket, continuation_token.as_deref())
                .await?;
            keys.extend(page.keys);

            continuation_token = page.next_token;
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(keys)
    }

    /// Keys ending with `suffix`, in the order the provider listed them.
    pub async fn list_matching_objects(
        &self,
        bucket: &str,
        suffix: &str,
    ) -> Result<Vec<String>, FetchError> {
        let keys: Vec<String> = self
            .list_objects(bucket)
            .await?
            .into_iter()
            .filter(|key| util::object::matches_suffix(key, suffix))
            .collect();
        self.reporter.debug(&format!("{:?}", keys));

        if keys.is_empty() {
            return Err(FetchError::NoMatchingFiles {
                bucket: bucket.to_string(),
                suffix: suffix.to_string(),
            });
        }

        Ok(keys)
    }

    /// Downloads `keys[i]` to `<output_dir>/<category>_<i>.<extension>`.
    ///
    /// Stops at the first failure; files already written stay on disk.
    pub async fn download_all(
        &self,
        bucket: &str,
        keys: &[String],
        extension: &str,
        output_dir: &Path,
    ) -> Result<Summary, FetchError> {
        let category = Category::from_extension(extension);

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|err| FetchError::io(output_dir, err))?;

        let mut summary = Summary::default();
        for (index, key) in keys.iter().enumerate() {
            let dest = output_dir.join(util::object::output_file_name(category, index, extension));

            let written = self.client.download_object(bucket, key, &dest).await?;
            self.reporter
                .debug(&format!("downloaded {} to {} ({} bytes)", key, dest.display(), written));

            summary.bytes += written;
            summary.files.push(dest);
        }

        Ok(summary)
    }

    pub async fn run(&self, config: &Config) -> Result<Summary, FetchError> {
        if !self.bucket_exists(&config.bucket_name).await? {
            return Err(FetchError::BucketNotFound(config.bucket_name.clone()));
        }

        let keys = self
            .list_matching_objects(&config.bucket_name, &config.file_name)
            .await?;

        let summary = self
            .download_all(&config.bucket_name, &keys, &config.extension, &config.output_dir())
            .await?;

        self.reporter.info(&format!(
            "downloaded {} files ({} bytes) into {}",
            summary.files.len(),
            summary.bytes,
            config.output_dir().display()
        ));
        self.reporter.info("Done");

        Ok(summary)
    }
}

/// Validates `settings`, then connects to the provider and runs the fetch.
///
/// `connect` is only invoked once the configuration is known to be valid.
pub async fn execute<F, Fut, S>(
    settings: Settings,
    reporter: &dyn Reporter,
    connect: F,
) -> Result<Summary, FetchError>
where
    F: FnOnce(&Config) -> Fut,
    Fut: Future<Output = S>,
    S: ObjectStore,
{
    let config = Config::try_from(settings)?;
    let store = connect(&config).await;

    Fetcher::new(&store, reporter).run(&config).await
}
