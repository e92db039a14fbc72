use crate::error::Result;
use crate::utils::constants::{DAY_FILE, ENV_PREFIX, HOUR_FILE, SETTINGS_FILE};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime settings: built-in defaults, then an optional TOML file, then
/// `BIKESHARE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub day_csv: PathBuf,
    pub hour_csv: PathBuf,
    pub use_mmap: bool,
    pub log_level: String,
}

impl Settings {
    /// Load settings; `path` overrides the default `bikeshare.toml`, which is
    /// optional. An explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p.to_path_buf()).required(true),
            None => File::with_name(SETTINGS_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("day_csv", DAY_FILE)?
            .set_default("hour_csv", HOUR_FILE)?
            .set_default("use_mmap", false)?
            .set_default("log_level", "info")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn with_day_csv(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.day_csv = p;
        }
        self
    }

    pub fn with_hour_csv(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.hour_csv = p;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "day_csv = \"data/day.csv\"")?;
        writeln!(file, "use_mmap = true")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.day_csv, PathBuf::from("data/day.csv"));
        assert_eq!(settings.hour_csv, PathBuf::from(HOUR_FILE));
        assert!(settings.use_mmap);
        assert_eq!(settings.log_level, "info");
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/bikeshare.toml"))).is_err());
    }

    #[test]
    fn test_command_line_paths_win() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "hour_csv = \"from-file.csv\"")?;

        let settings = Settings::load(Some(file.path()))?
            .with_hour_csv(Some(PathBuf::from("from-cli.csv")))
            .with_day_csv(None);

        assert_eq!(settings.hour_csv, PathBuf::from("from-cli.csv"));
        assert_eq!(settings.day_csv, PathBuf::from(DAY_FILE));
        Ok(())
    }
}
