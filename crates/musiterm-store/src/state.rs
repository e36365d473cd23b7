//! Application state assembled at startup.

use std::sync::Arc;

use musiterm_core::{ResourceProvider, Settings, StateCodec, TestRecord, Theme};

use crate::codec::{DirectoryProvider, PlainCodec};
use crate::config::AppConfig;
use crate::dictionary::DictionaryRepository;
use crate::error::DictionaryError;
use crate::history::HistoryLedger;
use crate::settings::SettingsStore;

/// Loaded dictionaries plus the user's settings and history.
///
/// Mutations persist immediately. A failed write is logged and the
/// in-memory value is kept.
pub struct AppState {
    pub config: AppConfig,
    dictionaries: DictionaryRepository,
    load_warnings: Vec<DictionaryError>,
    settings_store: SettingsStore,
    settings: Settings,
    history: HistoryLedger,
}

impl AppState {
    /// Open with resources from `config.resource_dir` and no encryption.
    pub fn open(config: AppConfig) -> Self {
        let codec: Arc<dyn StateCodec> = Arc::new(PlainCodec);
        let provider = DirectoryProvider::new(&config.resource_dir, codec.clone());
        Self::open_with(config, &provider, codec)
    }

    pub fn open_with(
        config: AppConfig,
        provider: &dyn ResourceProvider,
        codec: Arc<dyn StateCodec>,
    ) -> Self {
        let (dictionaries, load_warnings) = DictionaryRepository::load_all(provider);
        let settings_store = SettingsStore::new(config.settings_path(), codec.clone());
        let settings = settings_store.load();
        let history = HistoryLedger::open(config.history_path(), codec);

        tracing::debug!(
            data_dir = %config.data_dir.display(),
            degraded = load_warnings.len(),
            history = history.len(),
            "application state opened"
        );

        Self {
            config,
            dictionaries,
            load_warnings,
            settings_store,
            settings,
            history,
        }
    }

    pub fn dictionaries(&self) -> &DictionaryRepository {
        &self.dictionaries
    }

    /// Categories that failed to load and were replaced by empty sets.
    pub fn load_warnings(&self) -> &[DictionaryError] {
        &self.load_warnings
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &[TestRecord] {
        self.history.records()
    }

    pub fn record_result(&mut self, record: TestRecord) {
        if let Err(e) = self.history.append(record) {
            tracing::warn!("failed to save test history: {e}");
        }
    }

    pub fn clear_history(&mut self) {
        if let Err(e) = self.history.clear() {
            tracing::warn!("failed to clear test history: {e}");
        }
    }

    /// Flip the theme and persist. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.toggle_theme();
        self.save_settings();
        self.settings.theme
    }

    /// Apply `edit` to a copy of the settings and commit it.
    ///
    /// To cancel an edit, work on a clone of [`settings`](Self::settings)
    /// and simply drop it instead of calling [`commit_settings`](Self::commit_settings).
    pub fn update_settings(&mut self, edit: impl FnOnce(&mut Settings)) {
        let mut draft = self.settings.clone();
        edit(&mut draft);
        self.commit_settings(draft);
    }

    pub fn commit_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.save_settings();
    }

    /// Persist settings, then history.
    pub fn save_settings(&self) {
        if let Err(e) = self.settings_store.save(&self.settings) {
            tracing::warn!("failed to save settings: {e}");
        }
        if let Err(e) = self.history.flush() {
            tracing::warn!("failed to save test history: {e}");
        }
    }
}
