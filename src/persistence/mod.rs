use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

/// Key of the serialized [`ScheduleState`](crate::ScheduleState) record.
pub const SCHEDULE_KEY: &str = "scheduleData";
/// Key of the serialized [`AdminSession`](crate::AdminSession) record.
pub const SESSION_KEY: &str = "user";

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// String-keyed record store holding JSON text, modelled on browser local
/// storage. Every write replaces the whole record.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> PersistenceResult<()>;
    fn remove_item(&self, key: &str) -> PersistenceResult<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> PersistenceResult<()> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> PersistenceResult<()> {
        (**self).remove_item(key)
    }
}

/// Reads and decodes `key`. `Ok(None)` when the record is absent.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> PersistenceResult<Option<T>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> PersistenceResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    FileStorage, load_state_from_json, save_state_to_json, save_timetable_to_csv, validate_state,
};
pub use memory::MemoryStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;
