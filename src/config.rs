use std::path::PathBuf;

use crate::storage::StorageMediums;

/// Where and how the customer collection is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    pub medium: StorageMediums,
    pub create_if_missing: bool,
}

impl StorageConfig {
    pub fn new(
        data_file: Option<PathBuf>,
        medium: StorageMediums,
        create_if_missing: bool,
    ) -> Self {
        Self {
            data_file: data_file.unwrap_or_else(|| PathBuf::from(medium.default_path())),
            medium,
            create_if_missing,
        }
    }
}
