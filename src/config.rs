use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use crate::{model::error::FetchError, util};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Raw settings as read from the command line and the environment.
///
/// Every flag falls back to the environment variable of the same name, so a
/// `.env` file next to the binary is enough to drive a run.
#[derive(Debug, Parser)]
#[command(name = "bucketfetch", version, about = "Download every object in a bucket whose key ends with a file name")]
pub struct Settings {
    /// Bucket to download from.
    #[arg(long, env = "bucket_name")]
    pub bucket_name: Option<String>,

    /// Key suffix to match, e.g. `intro.mp4` or `.mp4`.
    #[arg(long, env = "file_name")]
    pub file_name: Option<String>,

    /// Directory under which the `<bucket_name>` output folder is created.
    #[arg(long, env = "BUCKETFETCH_OUTPUT_ROOT", default_value = ".")]
    pub output_root: PathBuf,

    /// Custom endpoint for S3-compatible providers. `AWS_ENDPOINT_URL` is
    /// honored by the SDK when this is unset.
    #[arg(long, env = "BUCKETFETCH_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Overrides the region resolved by the SDK (`AWS_REGION`, profile).
    #[arg(long, env = "BUCKETFETCH_REGION")]
    pub region: Option<String>,

    #[arg(long, env = "BUCKETFETCH_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,

    #[arg(long, env = "BUCKETFETCH_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Settings {
    /// Loads `.env` before parsing so its values can back the `env` fallbacks.
    pub fn try_init() -> Result<Self, clap::Error> {
        Self::load_dotenv();
        Self::try_parse()
    }

    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                eprintln!("Warning: failed to load .env file: {err}");
            }
        }
    }
}

/// Validated run configuration. Built once, never mutated.
#[derive(Clone, Debug)]
pub struct Config {
    pub bucket_name: String,
    pub file_name: String,
    pub extension: String,
    pub output_root: PathBuf,
    pub endpoint_url: Option<String>,
    pub region: Option<String>,
}

impl Config {
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(&self.bucket_name)
    }
}

impl TryFrom<Settings> for Config {
    type Error = FetchError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let bucket_name = settings.bucket_name.filter(|v| !v.is_empty());
        let file_name = settings.file_name.filter(|v| !v.is_empty());

        let (bucket_name, file_name) = match (bucket_name, file_name) {
            (Some(bucket_name), Some(file_name)) => (bucket_name, file_name),
            (None, Some(_)) => return Err(FetchError::ConfigMissing("bucket_name".to_string())),
            (Some(_), None) => return Err(FetchError::ConfigMissing("file_name".to_string())),
            (None, None) => {
                return Err(FetchError::ConfigMissing(
                    "bucket_name and file_name".to_string(),
                ))
            }
        };

        let extension = util::object::parse_extension(&file_name)
            .ok_or_else(|| FetchError::ConfigInvalid(file_name.clone()))?
            .to_string();

        Ok(Config {
            bucket_name,
            file_name,
            extension,
            output_root: settings.output_root,
            endpoint_url: settings.endpoint_url.filter(|v| !v.is_empty()),
            region: settings.region.filter(|v| !v.is_empty()),
        })
    }
}
