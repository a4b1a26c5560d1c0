// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PersistenceError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::{DeserializeOwned, Error as _};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_LOANS: &str = "loans";
pub const KEY_SESSION: &str = "session";

/// Current on-disk schema. Version 0 is the legacy bare-array format; it is
/// accepted on read and upgraded on the next write.
pub const SCHEMA_VERSION: u32 = 1;

/// The persistence adapter: an opaque string-keyed JSON store. Both domain
/// stores write through it on every mutation.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let dir = proj.data_dir().to_path_buf();
    fs::create_dir_all(&dir).context("Failed to create data dir")?;
    Ok(dir)
}

/// One `<key>.json` file per key inside a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(JsonFileStore { dir: data_dir()? })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let io_err = |e| PersistenceError::Io {
            key: key.to_string(),
            source: e,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path_for(key), value).map_err(io_err)
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u32,
    items: &'a [T],
}

/// Serialize a list under `key` inside the versioned envelope.
pub fn save_list<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), PersistenceError> {
    let env = Envelope {
        version: SCHEMA_VERSION,
        items,
    };
    let text = serde_json::to_string(&env).map_err(|e| PersistenceError::Corrupt {
        key: key.to_string(),
        source: e,
    })?;
    store.set(key, &text)
}

/// Load a list stored under `key`. Missing key yields an empty list; a bare
/// JSON array (the version-0 format) is accepted as-is. An envelope from a
/// newer schema, or one without an `items` array, is corrupt rather than
/// empty.
pub fn load_list<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, PersistenceError> {
    let Some(text) = store.get(key)? else {
        return Ok(Vec::new());
    };
    let corrupt = |e| PersistenceError::Corrupt {
        key: key.to_string(),
        source: e,
    };
    let value: serde_json::Value = serde_json::from_str(&text).map_err(corrupt)?;
    let items = if value.is_array() {
        value
    } else {
        let version = value.get("version").and_then(|v| v.as_u64()).unwrap_or(0);
        if version > SCHEMA_VERSION as u64 {
            return Err(corrupt(serde_json::Error::custom(format!(
                "unsupported schema version {}",
                version
            ))));
        }
        match value.get("items") {
            Some(items) if items.is_array() => items.clone(),
            _ => {
                return Err(corrupt(serde_json::Error::custom(
                    "envelope has no items array",
                )));
            }
        }
    };
    serde_json::from_value(items).map_err(corrupt)
}
