use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Plain-text layer for `--log-file`, with thread ids so search workers can be told apart.
fn file_layer<S>(file: File) -> fmt::Layer<S, DefaultFields, Format, File> {
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(true)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_output = log_file
        .map(|path| File::create(&path).map(file_layer))
        .transpose()?;

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer)
        .with(file_output)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::info;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(9, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::OFF);
    }

    #[test]
    #[serial]
    fn logger_installs_once_per_process() {
        let _ = setup_logging(1, false, None);

        assert!(matches!(
            setup_logging(0, false, None),
            Err(CliError::Other(_))
        ));
    }

    #[test]
    fn log_file_keeps_library_targets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("affinity.log");
        let subscriber = tracing_subscriber::registry().with(file_layer(File::create(&path).unwrap()));

        tracing::subscriber::with_default(subscriber, || {
            info!(target: "affinity::workflows::search", "Searching 120 candidates.");
        });

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("affinity::workflows::search"));
        assert!(content.contains("Searching 120 candidates."));
        assert!(!content.contains("\x1b["));
    }

    #[test]
    #[serial]
    fn log_file_in_a_directory_slot_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = setup_logging(0, false, Some(dir.path().to_path_buf()));

        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
