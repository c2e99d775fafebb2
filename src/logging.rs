use anyhow::{Context, Result};
use reelbot_common::LogSettings;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

// Matches the binary and every reelbot_* crate.
const DEBUG_DIRECTIVE: &str = "reelbot=debug";

/// Log to stderr and, when configured, append to a log file.
///
/// The returned guard flushes the file writer when dropped; keep it alive until exit.
pub fn init_tracing(settings: &LogSettings, debug: bool) -> Result<Option<WorkerGuard>> {
    let mut filter = EnvFilter::try_new(&settings.filter)
        .with_context(|| format!("Invalid log filter \"{}\".", settings.filter))?;
    if debug {
        filter = filter.add_directive(DEBUG_DIRECTIVE.parse()?);
    }

    let (file_layer, guard) = match &settings.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path {} has no file name.", path.display()))?;
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create the log directory {}.", dir.display())
            })?;
            // Several invocations may share the file; the appender only ever appends whole lines.
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber.")?;

    Ok(guard)
}

/// Plain stderr logging for failures that happen before the settings are known.
pub fn init_fallback_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();
}
