use crate::config::{Config, DebugLogRotation};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "compareason-debug.log";

/// Keeps the background log writer flushing until dropped.
#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

/// Initialize file logging for the terminal UI.
///
/// The TUI owns stdout/stderr, so logs only go to a file and only when
/// `debug` is enabled. Returns `None` when logging stays off.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let rotation = config.debug_log_rotation.unwrap_or(DebugLogRotation::Session);
    let base = resolve_base_log_path(config.debug_log_path.as_deref())?;
    let (dir, base_name) = split_dir_and_name(&base)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let (writer, shown_path, guard) = match rotation {
        DebugLogRotation::None => {
            let (writer, guard) = open_append(&base)?;
            (writer, base, guard)
        }
        DebugLogRotation::Daily => {
            // tracing_appender names daily files `{base_name}.{YYYY-MM-DD}`.
            prune_logs(&dir, &format!("{base_name}."), config.debug_log_keep.unwrap_or(7))?;
            let appender = tracing_appender::rolling::daily(&dir, &base_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (writer, base, guard)
        }
        DebugLogRotation::Session => {
            let prefix = format!("{base_name}.session-");
            prune_logs(&dir, &prefix, config.debug_log_keep.unwrap_or(20))?;
            let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
            let path = dir.join(format!("{prefix}{ts}"));
            let (writer, guard) = open_append(&path)?;
            (writer, path, guard)
        }
    };

    let filter = EnvFilter::try_new("compareason=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized (e.g. in tests).

    tracing::info!(log_file = %shown_path.display(), rotation = ?rotation, "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

/// Initialize stderr logging for headless commands.
///
/// `RUST_LOG` wins; otherwise this crate logs at debug level when `debug`
/// is set and only warnings when it is not.
pub fn init_stderr(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(stderr_filter_directive(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn stderr_filter_directive(debug: bool) -> &'static str {
    if debug {
        "compareason=debug,warn"
    } else {
        "compareason=warn"
    }
}

fn open_append(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    Ok(tracing_appender::non_blocking(file))
}

fn resolve_base_log_path(configured: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = configured else {
        let config_path = crate::config::config_path()?;
        return Ok(config_path.with_file_name(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &raw[1..]);
        }
    }
    raw.to_string()
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Delete all but the newest `keep` files starting with `prefix`.
///
/// Both rotation suffixes sort chronologically as strings. `keep == 0` keeps everything.
fn prune_logs(dir: &Path, prefix: &str, keep: usize) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with(prefix))
        .collect();

    names.sort_unstable_by(|a, b| b.cmp(a));

    for name in names.into_iter().skip(keep) {
        let path = dir.join(&name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stderr_filter_follows_debug_flag() {
        assert_eq!(stderr_filter_directive(true), "compareason=debug,warn");
        assert_eq!(stderr_filter_directive(false), "compareason=warn");
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = TempDir::new().unwrap();
        for ts in ["20260101-100000", "20260102-100000", "20260103-100000"] {
            std::fs::write(dir.path().join(format!("app.log.session-{ts}")), "").unwrap();
        }
        std::fs::write(dir.path().join("unrelated.txt"), "").unwrap();

        prune_logs(dir.path(), "app.log.session-", 2).unwrap();

        assert!(!dir.path().join("app.log.session-20260101-100000").exists());
        assert!(dir.path().join("app.log.session-20260102-100000").exists());
        assert!(dir.path().join("app.log.session-20260103-100000").exists());
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[test]
    fn test_prune_zero_keeps_everything() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.log.2026-01-01"), "").unwrap();

        prune_logs(dir.path(), "app.log.", 0).unwrap();

        assert!(dir.path().join("app.log.2026-01-01").exists());
    }

    #[test]
    fn test_directory_path_gets_default_file_name() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_base_log_path(dir.path().to_str()).unwrap();
        assert_eq!(resolved, dir.path().join(LOG_FILE_NAME));
    }

    #[test]
    fn test_bare_file_name_splits_into_current_dir() {
        let (dir, name) = split_dir_and_name(Path::new("debug.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "debug.log");
    }
}
