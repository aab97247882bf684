//! Flat key-value preferences store.
//!
//! Preferences are kept as a JSON object of string values, one file per
//! user. The timer core never touches this store; the CLI loads it, turns it
//! into a [`TimerConfig`] and hands the resulting settings to the controller.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{PrefsError, TimerConfig};
use crate::types::Profile;

/// Directory name under the user configuration directory.
const APP_DIR_NAME: &str = "pomodoro-modes";

/// File name of the preferences store.
const FILE_NAME: &str = "preferences.json";

/// Known preference keys.
pub mod keys {
    /// Base work duration in minutes
    pub const WORK_MINUTES: &str = "work_minutes";
    /// Base break duration in minutes
    pub const BREAK_MINUTES: &str = "break_minutes";
    /// Duration edit step in minutes
    pub const STEP_MINUTES: &str = "step_minutes";
    /// Completed sessions per round
    pub const SESSION_GOAL: &str = "session_goal";
    /// Selected profile
    pub const PROFILE: &str = "profile";

    /// Every known key, in display order.
    pub const ALL: [&str; 5] = [WORK_MINUTES, BREAK_MINUTES, STEP_MINUTES, SESSION_GOAL, PROFILE];
}

/// Persistent key-value preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// Returns the default preferences file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the user configuration directory is unknown.
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        let dir = dirs::config_dir().ok_or(PrefsError::NoConfigDir)?;
        Ok(dir.join(APP_DIR_NAME).join(FILE_NAME))
    }

    /// Loads preferences from `path`.
    ///
    /// A missing file yields an empty store bound to that path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "preferences file not found, using defaults");
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|source| PrefsError::Io {
            path: path.clone(),
            source,
        })?;
        let values = if raw.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&raw).map_err(|source| PrefsError::Parse {
                path: path.clone(),
                source,
            })?
        };

        Ok(Self { path, values })
    }

    /// Writes the preferences back to their file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(PrefsError::Serialize)?;
        fs::write(&self.path, json).map_err(|source| PrefsError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stores `value` under `key` after checking both.
    ///
    /// Numbers are only checked for being numbers; range clamping happens
    /// when the value is applied to the timer.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys and unparsable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        let normalized = normalize_value(key, value)?;
        self.values.insert(key.to_string(), normalized);
        Ok(())
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Clears every stored value.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Iterates over stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Checks a raw value for `key` and returns its stored form.
fn normalize_value(key: &str, value: &str) -> Result<String, PrefsError> {
    let invalid = || PrefsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };

    match key {
        keys::WORK_MINUTES | keys::BREAK_MINUTES | keys::STEP_MINUTES | keys::SESSION_GOAL => value
            .trim()
            .parse::<u32>()
            .map(|n| n.to_string())
            .map_err(|_| invalid()),
        keys::PROFILE => Profile::from_name(value)
            .map(|p| p.slug().to_string())
            .ok_or_else(invalid),
        _ => Err(PrefsError::UnknownKey(key.to_string())),
    }
}

impl TimerConfig {
    /// Reads a configuration from the store, falling back to defaults.
    ///
    /// Stored values that no longer parse are ignored with a warning.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        let mut config = TimerConfig::default();

        let read_u32 = |key: &str| -> Option<u32> {
            let raw = prefs.get(key)?;
            match raw.trim().parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    tracing::warn!(key, value = raw, "ignoring invalid stored preference");
                    None
                }
            }
        };

        if let Some(n) = read_u32(keys::WORK_MINUTES) {
            config.work_minutes = n;
        }
        if let Some(n) = read_u32(keys::BREAK_MINUTES) {
            config.break_minutes = n;
        }
        if let Some(n) = read_u32(keys::STEP_MINUTES) {
            config.step_minutes = n;
        }
        if let Some(n) = read_u32(keys::SESSION_GOAL) {
            config.session_goal = n;
        }
        if let Some(raw) = prefs.get(keys::PROFILE) {
            match Profile::from_name(raw) {
                Some(profile) => config.profile = profile,
                None => tracing::warn!(value = raw, "ignoring unknown stored profile"),
            }
        }

        config.sanitized()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_prefs_path() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);
        (dir, path)
    }

    mod store_tests {
        use super::*;

        #[test]
        fn test_load_missing_file_is_empty() {
            let (_dir, path) = temp_prefs_path();
            let prefs = Preferences::load(&path).unwrap();
            assert!(prefs.is_empty());
            assert_eq!(prefs.path(), path.as_path());
        }

        #[test]
        fn test_set_save_load() {
            let (_dir, path) = temp_prefs_path();
            let mut prefs = Preferences::load(&path).unwrap();
            prefs.set(keys::WORK_MINUTES, "30").unwrap();
            prefs.set(keys::PROFILE, "Double Pomodoro").unwrap();
            prefs.save().unwrap();

            let reloaded = Preferences::load(&path).unwrap();
            assert_eq!(reloaded.get(keys::WORK_MINUTES), Some("30"));
            assert_eq!(reloaded.get(keys::PROFILE), Some("double"));
        }

        #[test]
        fn test_set_unknown_key() {
            let (_dir, path) = temp_prefs_path();
            let mut prefs = Preferences::load(&path).unwrap();
            let err = prefs.set("colour", "red").unwrap_err();
            assert!(matches!(err, PrefsError::UnknownKey(ref k) if k == "colour"));
        }

        #[test]
        fn test_set_invalid_number() {
            let (_dir, path) = temp_prefs_path();
            let mut prefs = Preferences::load(&path).unwrap();
            let err = prefs.set(keys::SESSION_GOAL, "four").unwrap_err();
            assert!(matches!(err, PrefsError::InvalidValue { .. }));
            assert!(prefs.get(keys::SESSION_GOAL).is_none());
        }

        #[test]
        fn test_set_accepts_out_of_range_numbers() {
            let (_dir, path) = temp_prefs_path();
            let mut prefs = Preferences::load(&path).unwrap();
            prefs.set(keys::WORK_MINUTES, " 500 ").unwrap();
            assert_eq!(prefs.get(keys::WORK_MINUTES), Some("500"));
        }

        #[test]
        fn test_remove_and_reset() {
            let (_dir, path) = temp_prefs_path();
            let mut prefs = Preferences::load(&path).unwrap();
            prefs.set(keys::WORK_MINUTES, "30").unwrap();
            prefs.set(keys::BREAK_MINUTES, "10").unwrap();

            assert_eq!(prefs.remove(keys::WORK_MINUTES), Some("30".to_string()));
            assert_eq!(prefs.iter().count(), 1);

            prefs.reset();
            assert!(prefs.is_empty());
        }

        #[test]
        fn test_load_corrupt_file() {
            let (_dir, path) = temp_prefs_path();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "not json").unwrap();

            let err = Preferences::load(&path).unwrap_err();
            assert!(matches!(err, PrefsError::Parse { .. }));
        }

        #[test]
        fn test_load_empty_file() {
            let (_dir, path) = temp_prefs_path();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();

            assert!(Preferences::load(&path).unwrap().is_empty());
        }
    }

    mod timer_config_tests {
        use super::*;

        #[test]
        fn test_from_empty_preferences_is_default() {
            let (_dir, path) = temp_prefs_path();
            let prefs = Preferences::load(&path).unwrap();
            assert_eq!(TimerConfig::from_preferences(&prefs), TimerConfig::default());
        }

        #[test]
        fn test_from_preferences_reads_values() {
            let (_dir, path) = temp_prefs_path();
            let mut prefs = Preferences::load(&path).unwrap();
            prefs.set(keys::WORK_MINUTES, "45").unwrap();
            prefs.set(keys::BREAK_MINUTES, "15").unwrap();
            prefs.set(keys::SESSION_GOAL, "3").unwrap();
            prefs.set(keys::PROFILE, "double").unwrap();

            let config = TimerConfig::from_preferences(&prefs);
            assert_eq!(config.work_minutes, 45);
            assert_eq!(config.break_minutes, 15);
            assert_eq!(config.session_goal, 3);
            assert_eq!(config.profile, Profile::DoublePomodoro);
        }

        #[test]
        fn test_from_preferences_ignores_corrupt_values() {
            let (_dir, path) = temp_prefs_path();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, r#"{"work_minutes": "lots", "profile": "triple"}"#).unwrap();

            let prefs = Preferences::load(&path).unwrap();
            let config = TimerConfig::from_preferences(&prefs);
            assert_eq!(config.work_minutes, 25);
            assert_eq!(config.profile, Profile::Pomodoro);
        }

        #[test]
        fn test_from_preferences_sanitizes_zero_goal() {
            let (_dir, path) = temp_prefs_path();
            let mut prefs = Preferences::load(&path).unwrap();
            prefs.set(keys::SESSION_GOAL, "0").unwrap();
            assert_eq!(TimerConfig::from_preferences(&prefs).session_goal, 1);
        }
    }
}
