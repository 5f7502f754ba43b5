use super::*;

use crate::domain::RecordStore;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    Uninitialized,
    FileReady,
    Loaded,
    LoadFailed,
    Persisted,
}

/// Moves the whole customer collection between a `RecordStore` and one
/// backing file: ensure, load once, flush once.
pub struct PersistenceGateway {
    backend: Box<dyn CustomerStore>,
    create_if_missing: bool,
    state: GatewayState,
}

impl PersistenceGateway {
    pub fn new(backend: Box<dyn CustomerStore>, create_if_missing: bool) -> Self {
        Self {
            backend,
            create_if_missing,
            state: GatewayState::Uninitialized,
        }
    }

    pub fn state(&self) -> GatewayState {
        self.state
    }

    pub fn medium(&self) -> &str {
        self.backend.get_medium()
    }

    pub fn path(&self) -> &Path {
        self.backend.path()
    }

    fn expect_state(&self, expected: GatewayState, action: &str) -> Result<(), AppError> {
        if self.state != expected {
            return Err(AppError::Lifecycle(format!(
                "cannot {} while {:?} (expected {:?})",
                action, self.state, expected
            )));
        }
        Ok(())
    }

    /// Creates an empty backing file when allowed and absent. A failure here
    /// is logged and startup carries on; `load` then reports the real state
    /// of the file.
    pub fn ensure_store_exists(&mut self) -> Result<(), AppError> {
        self.expect_state(GatewayState::Uninitialized, "ensure the data file")?;

        if self.create_if_missing {
            match self.backend.create_if_missing() {
                Ok(true) => info!(
                    path = %self.backend.path().display(),
                    medium = self.backend.get_medium(),
                    "created empty data file"
                ),
                Ok(false) => debug!(path = %self.backend.path().display(), "data file present"),
                Err(e) => warn!(
                    path = %self.backend.path().display(),
                    error = %e,
                    "could not create data file, continuing"
                ),
            }
        }

        self.state = GatewayState::FileReady;
        Ok(())
    }

    /// Appends every stored record to `store`, in stored order.
    pub fn load(&mut self, store: &mut RecordStore) -> Result<usize, AppError> {
        self.expect_state(GatewayState::FileReady, "load")?;

        let loaded = self
            .backend
            .load()
            .and_then(|records| store.extend_loaded(records));

        match loaded {
            Ok(count) => {
                info!(
                    path = %self.backend.path().display(),
                    medium = self.backend.get_medium(),
                    count,
                    "loaded customers"
                );
                self.state = GatewayState::Loaded;
                Ok(count)
            }
            Err(e) => {
                self.state = GatewayState::LoadFailed;
                Err(e)
            }
        }
    }

    /// Overwrites the backing file with `records`. Runs at most once; a
    /// failed write is logged and not retried.
    pub fn flush(&mut self, records: &[CustomerRecord]) -> Result<(), AppError> {
        self.expect_state(GatewayState::Loaded, "flush")?;
        self.state = GatewayState::Persisted;

        match self.backend.save(records) {
            Ok(()) => {
                info!(
                    path = %self.backend.path().display(),
                    medium = self.backend.get_medium(),
                    count = records.len(),
                    "saved customers"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    path = %self.backend.path().display(),
                    count = records.len(),
                    error = %e,
                    "failed to save customers, changes from this session are lost"
                );
                Err(e)
            }
        }
    }
}
