//! Fail-open JSON collection access over a [`KeyValueBackend`].

use super::backend::KeyValueBackend;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Where a loaded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the stored entry.
    Stored,
    /// Entry was absent or empty and the default was written.
    Materialized,
    /// Entry was absent or empty and nothing was written.
    Absent,
    /// Entry exists but does not decode as the requested type.
    Corrupt,
    /// Backend could not be read.
    Unavailable,
}

/// A loaded value together with its [`LoadSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub value: T,
    pub source: LoadSource,
}

impl<T> Loaded<T> {
    fn new(value: T, source: LoadSource) -> Self {
        Self { value, source }
    }

    /// True when `value` is a stand-in for an entry that could not be read.
    pub fn fell_back(&self) -> bool {
        matches!(self.source, LoadSource::Corrupt | LoadSource::Unavailable)
    }
}

enum Decoded<T> {
    Value(T),
    Absent,
    Corrupt,
    Unavailable,
}

/// Whole-collection reader/writer for one key-value namespace.
///
/// # Invariants
/// - `load` pins the first value it materializes; later defaults are ignored.
/// - No method returns an error; failures are logged and absorbed.
/// - A corrupt entry is left in place so unreadable data is not discarded.
pub struct RecordStore<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads the value under `key`, materializing `default` on first access.
    ///
    /// An absent or empty entry is replaced by `default`. A corrupt entry or
    /// an unavailable backend yields `default` without touching storage.
    pub fn load<T>(&self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        self.load_checked(key, default).value
    }

    /// Same as [`RecordStore::load`], also reporting where the value came from.
    ///
    /// Callers that write the collection back check [`Loaded::fell_back`]
    /// first; saving a fallback would replace the unreadable entry.
    pub fn load_checked<T>(&self, key: &str, default: T) -> Loaded<T>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.decode(key) {
            Decoded::Value(value) => Loaded::new(value, LoadSource::Stored),
            Decoded::Absent => {
                debug!("event=store_load module=store status=materialize key={key}");
                self.save(key, &default);
                Loaded::new(default, LoadSource::Materialized)
            }
            Decoded::Corrupt => Loaded::new(default, LoadSource::Corrupt),
            Decoded::Unavailable => Loaded::new(default, LoadSource::Unavailable),
        }
    }

    /// Reads the value under `key` without materializing anything.
    ///
    /// Returns `None` when the entry is absent, empty, corrupt or unreadable.
    pub fn load_optional<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        self.load_optional_checked(key).value
    }

    /// Same as [`RecordStore::load_optional`]; `source` tells an absent entry
    /// apart from one that could not be decoded.
    pub fn load_optional_checked<T>(&self, key: &str) -> Loaded<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.decode(key) {
            Decoded::Value(value) => Loaded::new(Some(value), LoadSource::Stored),
            Decoded::Absent => Loaded::new(None, LoadSource::Absent),
            Decoded::Corrupt => Loaded::new(None, LoadSource::Corrupt),
            Decoded::Unavailable => Loaded::new(None, LoadSource::Unavailable),
        }
    }

    fn decode<T>(&self, key: &str) -> Decoded<T>
    where
        T: DeserializeOwned,
    {
        let raw = match self.backend.read_raw(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Decoded::Absent,
            Err(err) => {
                error!(
                    "event=store_load module=store status=fallback key={key} reason=unavailable error={err}"
                );
                return Decoded::Unavailable;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Decoded::Value(value),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback key={key} reason=corrupt error={err}"
                );
                Decoded::Corrupt
            }
        }
    }

    /// Replaces whatever is stored under `key` with `value`.
    ///
    /// Best effort: failures are logged and the call returns normally.
    pub fn save<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                error!("event=store_save module=store status=error key={key} reason=encode error={err}");
                return;
            }
        };

        match self.backend.write_raw(key, &raw) {
            Ok(()) => debug!(
                "event=store_save module=store status=ok key={key} bytes={}",
                raw.len()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error key={key} reason=unavailable error={err}"
            ),
        }
    }

    /// Deletes the entry under `key`; failures are logged and absorbed.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove_raw(key) {
            error!("event=store_remove module=store status=error key={key} error={err}");
        }
    }
}
