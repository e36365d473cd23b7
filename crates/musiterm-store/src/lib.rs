//! musiterm-store: everything musiterm reads from or writes to disk.
//!
//! Distributed term dictionaries come in through a [`ResourceProvider`];
//! user state (settings and test history) is written through a
//! [`StateCodec`] with atomic replace-on-write. Every read degrades to an
//! empty or default value instead of failing.
//!
//! [`ResourceProvider`]: musiterm_core::ResourceProvider
//! [`StateCodec`]: musiterm_core::StateCodec

pub mod codec;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod history;
pub mod settings;
pub mod state;

pub use codec::{DirectoryProvider, PlainCodec, StateFile};
pub use config::{load_config, load_config_from, AppConfig};
pub use dictionary::DictionaryRepository;
pub use error::{DictionaryError, StoreError};
pub use history::HistoryLedger;
pub use settings::SettingsStore;
pub use state::AppState;
