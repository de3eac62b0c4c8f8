use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use termshell_platform::AppPaths;

/// Append-only log file that is reopened if something deletes it between
/// writes.
struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    fn open(path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    fn reopen_if_missing(&mut self) -> io::Result<()> {
        if !self.path.exists() {
            *self = Self::open(self.path.clone())?;
        }
        Ok(())
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.reopen_if_missing()?;
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Cut an oversized log down to its newest whole lines, at most
/// `max_log_size` bytes.
fn trim_log_file_if_oversized(log_path: &Path, max_log_size: u64) {
    let Ok(metadata) = std::fs::metadata(log_path) else {
        return;
    };
    if metadata.len() <= max_log_size {
        return;
    }
    let Ok(contents) = std::fs::read(log_path) else {
        return;
    };

    let limit =
        usize::try_from(max_log_size).map_or(contents.len(), |max| max.min(contents.len()));
    let cut = contents.len() - limit;
    let keep_from = if cut == 0 || contents[cut - 1] == b'\n' {
        cut
    } else {
        contents[cut..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(contents.len(), |pos| cut + pos + 1)
    };
    let _ = std::fs::write(log_path, &contents[keep_from..]);
}

const fn level_for(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Warnings always go to stderr. With debug logging enabled, debug output
/// goes to stderr and to the log file in the data directory.
pub fn init_logging(debug_enabled: bool, max_log_size: u64) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("termshell")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level_for(debug_enabled),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let mut log_path = None;
    if debug_enabled && let Ok(paths) = AppPaths::new() {
        let path = paths.log_file();
        trim_log_file_if_oversized(&path, max_log_size);
        if let Ok(file) = LogFile::open(path.clone()) {
            loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
            log_path = Some(path);
        }
    }

    let _ = CombinedLogger::init(loggers);
    log::set_max_level(level_for(debug_enabled));

    if let Some(path) = log_path {
        log::debug!("Debug logging initialized, log file: {}", path.display());
    }
}
