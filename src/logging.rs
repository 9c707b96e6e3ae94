use std::path::Path;

use clap::ValueEnum;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Initialize the global tracing subscriber.
///
/// The level comes from `RUST_LOG`, defaulting to `info`. Logs go to stderr,
/// or to `log_file` when given; the returned guard must be held until
/// shutdown so buffered file output is flushed.
pub fn init(
    format: LogFormat,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let (writer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(directory)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {path:?}"))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                fmt::writer::BoxMakeWriter::new(writer),
                Some(guard),
            )
        }
        None => (fmt::writer::BoxMakeWriter::new(std::io::stderr), None),
    };

    let ansi = log_file.is_none();
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(writer).with_ansi(ansi).compact())
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(writer).json())
            .try_init()?,
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::info;

    #[test]
    fn init_writes_json_lines_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("gateway.log");

        let guard = init(LogFormat::Json, Some(&path)).unwrap();
        info!(name = "lodash", "package request");
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("package request"));
        assert!(contents.contains(r#""name":"lodash""#));
    }
}
