pub mod gateway;
pub mod stores;

use crate::config::StorageConfig;
use crate::prelude::{AppError, CustomerRecord};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

/// A backing file encoding for the whole customer collection.
pub trait CustomerStore {
    fn load(&self) -> Result<Vec<CustomerRecord>, AppError>;

    /// Replaces everything previously stored with `records`.
    fn save(&self, records: &[CustomerRecord]) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;

    fn path(&self) -> &Path;

    /// Creates an empty backing file if none exists. Returns whether a file
    /// was created.
    fn create_if_missing(&self) -> Result<bool, AppError> {
        let path = self.path();
        if path.exists() {
            return Ok(false);
        }

        create_file_parent(path)?;
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMediums {
    Json,
    Txt,
    Mem,
}

impl StorageMediums {
    pub fn is_json(&self) -> bool {
        matches!(self, StorageMediums::Json)
    }

    pub fn is_txt(&self) -> bool {
        matches!(self, StorageMediums::Txt)
    }

    pub fn is_mem(&self) -> bool {
        matches!(self, StorageMediums::Mem)
    }

    pub fn is_which(&self) -> &str {
        match self {
            StorageMediums::Json => "json",
            StorageMediums::Txt => "txt",
            StorageMediums::Mem => "mem",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            StorageMediums::Txt => "./.instance/customers.txt",
            _ => "./.instance/customers.jsonl",
        }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.to_lowercase().as_str() {
            "json" => Ok(StorageMediums::Json),
            "txt" => Ok(StorageMediums::Txt),
            "mem" => Ok(StorageMediums::Mem),
            _ => Err(AppError::Validation(
                "Not a recognized storage medium".to_string(),
            )),
        }
    }
}

pub fn parse_storage_type(config: &StorageConfig) -> Box<dyn CustomerStore> {
    match config.medium {
        StorageMediums::Json => Box::new(stores::JsonStorage::new(&config.data_file)),
        StorageMediums::Txt => Box::new(stores::TxtStorage::new(&config.data_file)),
        StorageMediums::Mem => Box::new(stores::MemStorage::new(&config.data_file)),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
