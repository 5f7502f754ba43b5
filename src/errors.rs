use core::fmt;

#[derive(Debug)]
pub enum AppError {
    Corrupt(String),
    Csv(csv::Error),
    DuplicateId(i32),
    Io(std::io::Error),
    Json(serde_json::Error),
    Lifecycle(String),
    NotFound(String),
    ParseCommand(String),
    ParseInt(std::num::ParseIntError),
    Regex(regex::Error),
    Validation(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ParseInt(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Regex(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Corrupt(msg) => {
                write!(f, "Data file is corrupt: {}", msg)
            }
            AppError::Csv(e) => {
                write!(f, "CSV error: {}", e)
            }
            AppError::DuplicateId(id) => {
                write!(f, "Customer with ID {} already exists", id)
            }
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Json(e) => {
                write!(f, "JSON error: {}", e)
            }
            AppError::Lifecycle(msg) => {
                write!(f, "Storage used out of order: {}", msg)
            }
            AppError::NotFound(item) => {
                write!(f, "{} Not found", item)
            }
            AppError::ParseCommand(cmd) => {
                write!(f, "Unrecognized command: '{}'", cmd)
            }
            AppError::ParseInt(e) => {
                write!(f, "Invalid number format: {}", e)
            }
            AppError::Regex(e) => {
                write!(f, "Invalid validation pattern: {}", e)
            }
            AppError::Validation(msg) => {
                write!(f, "Validation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {}
