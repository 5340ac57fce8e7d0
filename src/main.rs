use std::process::ExitCode;

use tracing::{info, info_span, Instrument, Level};

mod adapters;
mod config;
mod fetch;
mod model;
mod report;
mod util;

use report::Reporter;

#[tokio::main]
async fn main() -> ExitCode {
    let reporter = report::TracingReporter;

    let settings = match config::Settings::try_init() {
        Ok(settings) => settings,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            report::init_tracing(Level::INFO, config::LogFormat::Pretty);

            let err = model::error::FetchError::from(err);
            reporter.critical(err.group(), &err.to_string());
            return ExitCode::from(err.exit_code());
        }
    };
    report::init_tracing(settings.log_level, settings.log_format);

    let res = async {
        info!(
            bucket = settings.bucket_name.as_deref().unwrap_or(""),
            file_name = settings.file_name.as_deref().unwrap_or(""),
            "args"
        );

        fetch::execute(settings, &reporter, |config| {
            let region = config.region.clone();
            let endpoint_url = config.endpoint_url.clone();
            async move {
                let sdk_config = adapters::s3::S3Store::load_sdk_config(region).await;
                adapters::s3::S3Store::new(&sdk_config, endpoint_url.as_deref())
            }
        })
        .await
    }
    .instrument(info_span!("main", context = "main"))
    .await;

    match res {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            reporter.critical(err.group(), &err.to_string());
            ExitCode::from(err.exit_code())
        }
    }
}
