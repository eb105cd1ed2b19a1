//! Logging setup for the command line front-end.
//!
//! The library itself only uses the `log` macros; whoever runs it decides where
//! the records go. The binary calls [`init_logger`] once with the level and log
//! file from the configuration.
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// Terminal logger plus, when `log_file` is given, a file logger at the same level.
///
/// A log file that cannot be created is reported on stderr and skipped. Calling
/// this twice keeps the first logger.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(err) => eprintln!("cannot create log file {}: {}", path.display(), err),
        }
    }
    let _ = CombinedLogger::init(loggers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        init_logger(LevelFilter::Info, Some(&path));
        init_logger(LevelFilter::Debug, None);
        log::info!("logger test record");
    }
}
