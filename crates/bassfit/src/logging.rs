use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Split a `--log-file` path into the appender's directory and file name.
/// A bare file name lives in the current directory.
fn log_file_parts(path: &Path) -> color_eyre::Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("log file path {} has no file name", path.display()))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok((directory, file_name))
}

/// Initialize logging to stdout and, optionally, a log file.
///
/// The level applies to the `bassfit` target; library events below `warn`
/// are hidden unless `RUST_LOG` says otherwise. When `log_file` is set, a
/// second ANSI-free layer appends to it through a non-rotating appender on
/// a background thread. The returned guard flushes that writer on drop and
/// must live until exit.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<Option<WorkerGuard>> {
    let default_filter = format!("bassfit={level},bassfit_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (directory, file_name) = log_file_parts(path)?;
            fs::create_dir_all(directory).wrap_err_with(|| {
                format!("failed to create log directory {}", directory.display())
            })?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .wrap_err("failed to install tracing subscriber")?;

    if let Some(path) = log_file {
        tracing::debug!("Logging to {}", path.display());
    }
    Ok(guard)
}
