//! Persistent settings store.
//!
//! The file holds a flat JSON object:
//!
//! ```json
//! {"theme": "dark", "master_volume": 1.0, "click_volume": 1.0,
//!  "correct_volume": 1.0, "incorrect_volume": 1.0, "typing_volume": 1.0}
//! ```
//!
//! Loading never fails. Each field falls back to its default on its own
//! when it is missing or malformed, and an unreadable file yields
//! [`Settings::default`].

use std::path::PathBuf;
use std::sync::Arc;

use musiterm_core::model::DEFAULT_VOLUME;
use musiterm_core::{Settings, StateCodec, Theme};
use serde::Deserialize;
use serde_json::Value;

use crate::codec::StateFile;
use crate::error::StoreError;

/// On-disk shape, with every field optional and untyped.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    theme: Option<Value>,
    #[serde(default)]
    master_volume: Option<Value>,
    #[serde(default)]
    click_volume: Option<Value>,
    #[serde(default)]
    correct_volume: Option<Value>,
    #[serde(default)]
    incorrect_volume: Option<Value>,
    #[serde(default)]
    typing_volume: Option<Value>,
}

impl RawSettings {
    fn into_settings(self) -> Settings {
        // Anything other than an explicit "light" is dark.
        let theme = match self.theme {
            Some(Value::String(s)) if s == "light" => Theme::Light,
            _ => Theme::Dark,
        };

        Settings {
            theme,
            master_volume: volume_field("master_volume", self.master_volume),
            click_volume: volume_field("click_volume", self.click_volume),
            correct_volume: volume_field("correct_volume", self.correct_volume),
            incorrect_volume: volume_field("incorrect_volume", self.incorrect_volume),
            typing_volume: volume_field("typing_volume", self.typing_volume),
        }
    }
}

/// Numbers and numeric strings are accepted; anything else is the default.
fn volume_field(name: &str, value: Option<Value>) -> f64 {
    let parsed = match &value {
        None | Some(Value::Null) => return DEFAULT_VOLUME,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::warn!(field = name, ?value, "ignoring malformed volume");
        DEFAULT_VOLUME
    })
}

/// Loads and saves the [`Settings`] record.
pub struct SettingsStore {
    file: StateFile,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>, codec: Arc<dyn StateCodec>) -> Self {
        Self {
            file: StateFile::new(path, codec),
        }
    }

    /// Settings from disk, or defaults if there are none or they are unreadable.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("{e}; using default settings");
                Settings::default()
            }
        }
    }

    /// Like [`load`](Self::load) but reports why the file was rejected.
    ///
    /// `Ok(None)` means there is no file, or it is blank.
    pub fn try_load(&self) -> Result<Option<Settings>, StoreError> {
        let Some(bytes) = self.file.read()? else {
            return Ok(None);
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let raw: RawSettings =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: self.file.path().to_path_buf(),
                source,
            })?;
        Ok(Some(raw.into_settings()))
    }

    /// Overwrite the file with `settings`. Values are written as given.
    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let json = serde_json::to_vec(settings).map_err(|source| StoreError::Malformed {
            path: self.file.path().to_path_buf(),
            source,
        })?;
        self.file.write(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PlainCodec;
    use musiterm_core::SoundChannel;

    fn store(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("app_config.enc"), Arc::new(PlainCodec))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = store(&dir).load();
        assert_eq!(settings, Settings::default());
        assert!(settings.is_dark_theme());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app_config.enc"), "  \n").unwrap();
        assert_eq!(store(&dir).load(), Settings::default());
    }

    #[test]
    fn garbage_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app_config.enc"), "{not json").unwrap();
        let store = store(&dir);
        assert!(matches!(store.try_load(), Err(StoreError::Malformed { .. })));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let mut settings = Settings::default();
        settings.toggle_theme();
        settings.set_volume(SoundChannel::Master, 0.7);
        settings.set_volume(SoundChannel::Typing, 0.0);
        settings.set_volume(SoundChannel::Click, 0.3);

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn long_volumes_reload_bit_for_bit() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let mut settings = Settings::default();
        settings.master_volume = 0.9891680324959025;
        settings.correct_volume = 0.1 + 0.2;
        settings.typing_volume = f64::MIN_POSITIVE;
        settings.click_volume = 1.0 - f64::EPSILON;

        store.save(&settings).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.master_volume.to_bits(), settings.master_volume.to_bits());
        assert_eq!(loaded.correct_volume.to_bits(), settings.correct_volume.to_bits());
        assert_eq!(loaded.typing_volume.to_bits(), settings.typing_volume.to_bits());
        assert_eq!(loaded.click_volume.to_bits(), settings.click_volume.to_bits());
    }

    #[test]
    fn volumes_round_trip_across_the_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let mut settings = Settings::default();
        for i in 0..200u32 {
            settings.master_volume = f64::from(i) / 201.0 + 1e-9 * f64::from(i % 7);
            store.save(&settings).unwrap();
            assert_eq!(store.load().master_volume, settings.master_volume, "{i}");
        }
    }

    #[test]
    fn missing_fields_default_independently() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app_config.enc"),
            r#"{"theme": "light", "master_volume": 0.5, "click_volume": 0.2,
                "correct_volume": 0.9, "incorrect_volume": 0.1}"#,
        )
        .unwrap();

        let settings = store(&dir).load();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.master_volume, 0.5);
        assert_eq!(settings.click_volume, 0.2);
        assert_eq!(settings.correct_volume, 0.9);
        assert_eq!(settings.incorrect_volume, 0.1);
        assert_eq!(settings.typing_volume, 1.0);
    }

    #[test]
    fn malformed_fields_default_independently() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app_config.enc"),
            r#"{"theme": "sepia", "master_volume": "0.4", "click_volume": [1],
                "typing_volume": null}"#,
        )
        .unwrap();

        let settings = store(&dir).load();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.master_volume, 0.4);
        assert_eq!(settings.click_volume, 1.0);
        assert_eq!(settings.typing_volume, 1.0);
    }

    #[test]
    fn saved_file_uses_documented_keys() {
        let dir = tempfile::tempdir().unwrap();
        store(&dir).save(&Settings::default()).unwrap();
        let raw = std::fs::read_to_string(dir.path().join("app_config.enc")).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["theme"], "dark");
        for key in [
            "master_volume",
            "click_volume",
            "correct_volume",
            "incorrect_volume",
            "typing_volume",
        ] {
            assert_eq!(value[key], 1.0, "{key}");
        }
    }
}
