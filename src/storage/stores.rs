use super::*;

use crate::helper;
use csv::{Reader, Writer};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

pub const DEFAULT_IMPORT_PATH: &str = "./csv/customers.csv";
pub const DEFAULT_EXPORT_PATH: &str = "./csv/exported.csv";

/// One JSON object per line, after a versioned header line.
pub struct JsonStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "json".to_string(),
            path: path.into(),
        }
    }
}

/// `{ key=value ... }` blocks, one per customer.
pub struct TxtStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl TxtStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "txt".to_string(),
            path: path.into(),
        }
    }
}

/// Keeps nothing between runs.
pub struct MemStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl MemStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "mem".to_string(),
            path: path.into(),
        }
    }
}

pub struct CsvStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl CsvStorage {
    /// Source must be a `.csv` file; directories are refused.
    pub fn for_import(path: Option<&Path>) -> Result<Self, AppError> {
        let file_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMPORT_PATH));

        if file_path.is_dir() {
            return Err(AppError::Validation(format!(
                "{} is a directory, import needs a .csv file",
                file_path.display()
            )));
        }
        Self::with_csv_extension(file_path)
    }

    /// A directory destination gets `exported.csv` inside it.
    pub fn for_export(path: Option<&Path>) -> Result<Self, AppError> {
        let file_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

        if file_path.is_dir() {
            return Ok(Self::csv(file_path.join("exported.csv")));
        }
        Self::with_csv_extension(file_path)
    }

    fn with_csv_extension(file_path: PathBuf) -> Result<Self, AppError> {
        if file_path.extension().is_none_or(|ext| ext != "csv") {
            return Err(AppError::Validation("File must be a .csv file".to_string()));
        }
        Ok(Self::csv(file_path))
    }

    fn csv(path: PathBuf) -> Self {
        Self {
            medium: "csv".to_string(),
            path,
        }
    }
}

fn write_truncating(path: &Path, data: &[u8]) -> Result<(), AppError> {
    create_file_parent(path)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}

impl CustomerStore for JsonStorage {
    fn load(&self) -> Result<Vec<CustomerRecord>, AppError> {
        if !fs::exists(&self.path)? {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        helper::deserialize_customers_from_json_lines(reader)
    }

    fn save(&self, records: &[CustomerRecord]) -> Result<(), AppError> {
        let data = helper::serialize_customers_to_json_lines(records)?;
        write_truncating(&self.path, data.as_bytes())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl CustomerStore for TxtStorage {
    fn load(&self) -> Result<Vec<CustomerRecord>, AppError> {
        if !fs::exists(&self.path)? {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        helper::deserialize_customers_from_txt_buffer(reader)
    }

    fn save(&self, records: &[CustomerRecord]) -> Result<(), AppError> {
        let data = helper::serialize_customers_to_txt(records);
        write_truncating(&self.path, data.as_bytes())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl CustomerStore for MemStorage {
    fn load(&self) -> Result<Vec<CustomerRecord>, AppError> {
        Ok(Vec::new())
    }

    fn save(&self, _records: &[CustomerRecord]) -> Result<(), AppError> {
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn create_if_missing(&self) -> Result<bool, AppError> {
        Ok(false)
    }
}

impl CustomerStore for CsvStorage {
    fn load(&self) -> Result<Vec<CustomerRecord>, AppError> {
        if !self.path.exists() {
            return Err(AppError::NotFound("CSV file".to_string()));
        }

        let mut reader = Reader::from_path(&self.path)?;
        let mut records = Vec::new();

        for result in reader.deserialize() {
            let record: CustomerRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    fn save(&self, records: &[CustomerRecord]) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let mut writer = Writer::from_path(&self.path)?;

        for record in records {
            writer.serialize(record)?;
        }

        writer.flush()?;

        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn create_if_missing(&self) -> Result<bool, AppError> {
        Ok(false)
    }
}
