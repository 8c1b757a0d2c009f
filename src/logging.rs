use std::fs::File;
use std::path::Path;

/// Sends `log` output to `path` at debug level.
///
/// The console belongs to the interactive session, so nothing is logged to
/// it. When the log file cannot be created a warning is printed and the
/// program runs without logging.
pub fn init_file_logger(path: &Path) {
    match File::create(path) {
        Ok(log_file) => {
            let _ = simplelog::WriteLogger::init(
                log::LevelFilter::Debug,
                simplelog::Config::default(),
                Box::new(log_file),
            );
        }
        Err(error) => eprintln!(
            "Warning: unable to open log file {}: {}",
            path.display(),
            error
        ),
    }
}
