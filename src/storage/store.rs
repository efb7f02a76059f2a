use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::Result;

/// Small persistent key-value store backed by one JSON object file.
///
/// Every call reads the file fresh and writes it back whole, so two
/// handles on the same path always agree. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.read()?.get(key).and_then(Value::as_bool))
    }

    pub fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.update(|map| {
            map.insert(key.to_string(), Value::Bool(value));
        })
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.update(|map| {
            map.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.update(|map| {
            map.remove(key);
        })
    }

    fn read(&self) -> Result<Map<String, Value>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, change: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let mut map = self.read()?;
        change(&mut map);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        debug!("Store written: {}", self.path.display());
        Ok(())
    }
}
