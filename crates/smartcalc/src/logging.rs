//! File logging for the command-line front end
//!
//! Every run appends to `<data_dir>/smartcalc.log`. The file is trimmed at
//! startup once it outgrows [`LogRotation::DEFAULT`], so a long-lived data
//! directory never accumulates more than a few megabytes of history.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the data directory
pub const LOG_FILE: &str = "smartcalc.log";

const ROTATION_MARKER: &str = "--- smartcalc: earlier log entries trimmed ---\n";

/// Size-based trimming policy for the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRotation {
    /// Size in bytes above which the file is trimmed
    pub max_bytes: u64,
    /// Approximate number of most recent bytes that survive a trim
    pub keep_bytes: u64,
}

impl LogRotation {
    /// Trim past 5 MB, keeping about the last 1 MB
    pub const DEFAULT: LogRotation = LogRotation {
        max_bytes: 5 * 1024 * 1024,
        keep_bytes: 1024 * 1024,
    };

    /// Trim `path` in place if it is over the limit. Only whole lines are
    /// kept. Returns whether the file was rewritten.
    pub fn apply(&self, path: &Path) -> io::Result<bool> {
        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if size <= self.max_bytes {
            return Ok(false);
        }

        let content = fs::read(path)?;
        let cut = content.len().saturating_sub(self.keep_bytes as usize);
        let tail = &content[cut..];
        let tail = match tail.iter().position(|&b| b == b'\n') {
            Some(newline) if cut > 0 => &tail[newline + 1..],
            _ => tail,
        };

        let mut trimmed = Vec::with_capacity(ROTATION_MARKER.len() + tail.len());
        trimmed.extend_from_slice(ROTATION_MARKER.as_bytes());
        trimmed.extend_from_slice(tail);
        fs::write(path, trimmed)?;
        Ok(true)
    }
}

/// The log file, shared between every writer the subscriber asks for
#[derive(Clone)]
struct SharedLog(Arc<Mutex<File>>);

impl Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::other("smartcalc log lock poisoned"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::other("smartcalc log lock poisoned"))?;
        file.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedLog {
    type Writer = SharedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Filter directive for a `--log-level` value.
///
/// The engine crate logs per-calculation detail, so it stays at `warn`
/// unless a debugging level is requested.
pub fn default_filter(level: &str) -> String {
    let engine = match level {
        "debug" | "trace" => level,
        _ => "warn",
    };
    format!("smartcalc={level},smartcalc_core={engine}")
}

/// Start logging to `{data_dir}/smartcalc.log`. `RUST_LOG` overrides `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE);
    if let Err(e) = LogRotation::DEFAULT.apply(&log_path) {
        eprintln!("Warning: could not trim {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    let file_layer = fmt::layer()
        .with_writer(SharedLog(Arc::new(Mutex::new(file))))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        log_path = %log_path.display(),
        version = env!("CARGO_PKG_VERSION"),
        "SmartCalc logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn policy(max_bytes: u64, keep_bytes: u64) -> LogRotation {
        LogRotation {
            max_bytes,
            keep_bytes,
        }
    }

    #[test]
    fn test_small_log_is_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(!policy(1024, 4).apply(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_missing_log_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(!policy(0, 0).apply(&dir.path().join(LOG_FILE)).unwrap());
    }

    #[test]
    fn test_rotation_keeps_whole_recent_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        let lines: String = (0..100).map(|i| format!("line {i:03}\n")).collect();
        fs::write(&path, &lines).unwrap();

        // Keep 20 bytes: the tail of `line 097` is dropped
        assert!(policy(100, 20).apply(&path).unwrap());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{ROTATION_MARKER}line 098\nline 099\n"));
    }

    #[test]
    fn test_keep_larger_than_file_keeps_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        fs::write(&path, "alpha\nbeta\n").unwrap();

        assert!(policy(4, 1024).apply(&path).unwrap());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{ROTATION_MARKER}alpha\nbeta\n"));
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("info"), "smartcalc=info,smartcalc_core=warn");
        assert_eq!(default_filter("debug"), "smartcalc=debug,smartcalc_core=debug");
    }

    #[test]
    fn test_shared_log_writers_append_to_one_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        let file = OpenOptions::new().create(true).append(true).open(&path).unwrap();
        let log = SharedLog(Arc::new(Mutex::new(file)));

        log.make_writer().write_all(b"first\n").unwrap();
        let mut second = log.make_writer();
        second.write_all(b"second\n").unwrap();
        second.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
