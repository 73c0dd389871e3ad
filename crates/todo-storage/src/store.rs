//! Key-value store abstraction and typed JSON helpers

use parking_lot::MutexGuard;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::Result;

/// Held for the duration of a read-modify-write.
pub type WriteGuard<'a> = MutexGuard<'a, ()>;

/// A flat namespace of string keys mapping to string values.
///
/// Implementations must be cheap to clone handles onto the same underlying
/// data so that several stores can share one backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Write several entries. Backends that support it apply all of them or
    /// none; the default writes them one by one.
    fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// All keys starting with `prefix`, in lexicographic order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Writer lock shared by every handle onto this backend.
    ///
    /// Plain `get`/`set` never take it; callers hold it across a
    /// read-modify-write so that no other writer interleaves.
    fn write_guard(&self) -> WriteGuard<'_>;
}

/// Read and parse the JSON document under `key`.
///
/// A value that does not parse is reported as [`StorageError::Corrupt`].
pub fn get_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Like [`get_json`], with a missing key yielding `T::default()`.
pub fn get_json_or_default<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    Ok(get_json(store, key)?.unwrap_or_default())
}

pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let serialized = serde_json::to_string(value)?;
    store.set(key, &serialized)
}
