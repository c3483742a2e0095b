use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

/// Sends log output to `path`. Logging is never a reason not to play: if the
/// file can't be created or a logger is already installed, this warns once on
/// stderr and carries on.
pub fn init(path: &Path) {
    if let Err(err) = WriteLogger::init(LevelFilter::Info, Config::default(), log_target(path)) {
        eprintln!("Warning: logging disabled: {}", err);
    }
}

/// The log file at `path`, or a sink that discards everything when the file
/// can't be created.
pub fn log_target(path: &Path) -> Box<dyn Write + Send> {
    match File::create(path) {
        Ok(file) => Box::new(file),
        Err(err) => {
            eprintln!("Warning: can't create log file {}: {}; logging disabled", path.display(), err);
            Box::new(io::sink())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_falls_back_to_sink() {
        let path = std::env::temp_dir().join("snake_remastered_missing_dir").join("nested").join("game.log");
        let mut target = log_target(&path);

        assert!(target.write_all(b"Score: 1\n").is_ok());
        assert!(target.flush().is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_log_file_is_created() {
        let path = std::env::temp_dir().join(format!("snake_remastered_{}.log", std::process::id()));
        {
            let mut target = log_target(&path);
            target.write_all(b"Game initialized.\n").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Game initialized.\n");
        std::fs::remove_file(&path).unwrap();
    }
}
