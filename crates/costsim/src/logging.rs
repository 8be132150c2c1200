use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the output directory
pub const LOG_FILE_NAME: &str = "costsim.log";

/// Size limits for the run log
#[derive(Debug, Clone, Copy)]
struct LogRotation {
    /// Trim once the log grows past this many bytes (5 MB)
    max_bytes: u64,
    /// Bytes of recent history retained after a trim (1 MB)
    keep_bytes: u64,
}

impl Default for LogRotation {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            keep_bytes: 1024 * 1024,
        }
    }
}

const ROTATION_MARKER: &[u8] = b"--- earlier runs trimmed from costsim.log ---\n";

impl LogRotation {
    /// Trim an oversized log to its most recent whole lines.
    /// Returns whether anything was trimmed.
    fn apply(&self, log_path: &Path) -> std::io::Result<bool> {
        let len = match fs::metadata(log_path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len <= self.max_bytes {
            return Ok(false);
        }

        let mut tail = Vec::new();
        let mut file = File::open(log_path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(self.keep_bytes)))?;
        file.read_to_end(&mut tail)?;
        drop(file);

        let mut file = File::create(log_path)?;
        file.write_all(ROTATION_MARKER)?;
        file.write_all(whole_lines(&tail))?;
        Ok(true)
    }
}

/// Everything after the first newline, so a cut never starts mid-line
fn whole_lines(tail: &[u8]) -> &[u8] {
    match tail.iter().position(|&b| b == b'\n') {
        Some(i) => &tail[i + 1..],
        None => tail,
    }
}

/// Initialize logging to a file in the output directory.
///
/// Logs go to `{output_dir}/costsim.log` with size-based rotation. The
/// `RUST_LOG` environment variable overrides `level`.
pub fn init_logging(output_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(output_dir)?;

    let log_path = output_dir.join(LOG_FILE_NAME);

    if let Err(e) = LogRotation::default().apply(&log_path) {
        eprintln!("Warning: Failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let default_filter = format!("costsim={level},costsim_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "costsim logging initialized");
    Ok(())
}
