// src/settings.rs
// Runtime settings for the scratch game binary, read from a simple
// `key = value` file (conf/scratch.conf).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::defs::SETTINGS_PATH;
use crate::logging::{self, LogLevel, log_info, log_warning};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Fixed seed for reproducible plays; OS entropy when unset
    pub seed: Option<u64>,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_str_content(&content)
    }

    fn from_str_content(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let settings_map = parse_settings(content);

        let seed = match settings_map.get("seed") {
            Some(value) => {
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("invalid seed `{value}`: {e}"))?;
                Some(seed)
            }
            None => None,
        };

        let log_level = match settings_map.get("log_level") {
            Some(value) => {
                LogLevel::parse(value).ok_or_else(|| format!("invalid log_level `{value}`"))?
            }
            None => LogLevel::Info,
        };

        Ok(Settings { seed, log_level })
    }

    /// Load conf/scratch.conf and apply its log level
    pub fn load_or_default() -> Self {
        Self::load_from_or_default(SETTINGS_PATH)
    }

    /// Load settings from `path`, falling back to defaults. The resulting log
    /// level is applied before anything is logged.
    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            let settings = Self::default();
            logging::set_level(settings.log_level);
            return settings;
        }

        match Self::from_file(path) {
            Ok(settings) => {
                logging::set_level(settings.log_level);
                log_info(&format!("Loaded settings from {}", path.display()));
                settings
            }
            Err(e) => {
                let settings = Self::default();
                logging::set_level(settings.log_level);
                log_warning(&format!(
                    "Could not load settings from {}: {}. Using defaults.",
                    path.display(),
                    e
                ));
                settings
            }
        }
    }

    /// Random source for one play
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        }
    }
}

fn parse_settings(content: &str) -> HashMap<String, String> {
    let mut settings = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            settings.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Write;

    #[test]
    fn test_parse_settings() {
        let content = r#"
            # Reproducible plays
            seed = 1234
            log_level = warning
            # unknown keys are ignored
            colour = blue
        "#;

        let map = parse_settings(content);
        assert_eq!(map.get("seed"), Some(&"1234".to_string()));
        assert_eq!(map.get("log_level"), Some(&"warning".to_string()));
        assert_eq!(map.get("colour"), Some(&"blue".to_string()));

        let settings = Settings::from_str_content(content).unwrap();
        assert_eq!(settings.seed, Some(1234));
        assert_eq!(settings.log_level, LogLevel::Warning);
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.seed, None);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(Settings::from_str_content("").unwrap(), settings);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(Settings::from_str_content("seed = twelve").is_err());
        assert!(Settings::from_str_content("log_level = chatty").is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let settings = Settings { seed: Some(7), log_level: LogLevel::Off };
        let mut first = settings.rng();
        let mut second = settings.rng();
        let a: Vec<u32> = (0..8).map(|_| first.random_range(0..1000)).collect();
        let b: Vec<u32> = (0..8).map(|_| second.random_range(0..1000)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 42").unwrap();
        writeln!(file, "log_level = off").unwrap();
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings, Settings { seed: Some(42), log_level: LogLevel::Off });

        assert!(Settings::from_file("/nonexistent/scratch.conf").is_err());
    }

    #[test]
    fn test_load_applies_log_level_first() {
        // Only test touching the global level
        let mut quiet = tempfile::NamedTempFile::new().unwrap();
        writeln!(quiet, "log_level = off").unwrap();
        let settings = Settings::load_from_or_default(quiet.path());
        assert_eq!(settings.log_level, LogLevel::Off);
        assert_eq!(logging::level(), LogLevel::Off);

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "seed = many").unwrap();
        assert_eq!(Settings::load_from_or_default(broken.path()), Settings::default());
        assert_eq!(logging::level(), LogLevel::Info);

        Settings::load_from_or_default(quiet.path());
        assert_eq!(logging::level(), LogLevel::Off);
        let missing = Settings::load_from_or_default("/nonexistent/scratch.conf");
        assert_eq!(missing, Settings::default());
        assert_eq!(logging::level(), LogLevel::Info);
    }
}
