use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use indicatif::{ProgressBar, ProgressStyle};

pub fn get_progressbar_long_jobs(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Starts logging to stderr, filtered by `RUST_LOG` or `info` if unset.
///
/// Logging stops when the returned handle is dropped, so binaries keep it
/// alive for the whole run.
pub fn init_logging() -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str("info")?.start()
}
