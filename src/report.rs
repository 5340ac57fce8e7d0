use tracing::{debug, error, info, Level};

use crate::config::LogFormat;

/// The only channel through which the pipeline talks to the operator.
pub trait Reporter {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    fn critical(&self, group: &str, message: &str);
}

pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn debug(&self, message: &str) {
        debug!("{}", message);
    }

    fn critical(&self, group: &str, message: &str) {
        error!(severity = "critical", error_group = group, "{}", message);
    }
}

pub fn init_tracing(level: Level, format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_max_level(level);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[cfg(test)]
pub mod recording {
    use std::sync::Mutex;

    use super::Reporter;

    #[derive(Default)]
    pub struct RecordingReporter {
        pub records: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingReporter {
        pub fn messages(&self, level: &str) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }

        fn push(&self, level: &'static str, message: &str) {
            self.records.lock().unwrap().push((level, message.to_string()));
        }
    }

    impl Reporter for RecordingReporter {
        fn info(&self, message: &str) {
            self.push("info", message);
        }

        fn debug(&self, message: &str) {
            self.push("debug", message);
        }

        fn critical(&self, group: &str, message: &str) {
            self.push("critical", &format!("{}: {}", group, message));
        }
    }
}
