use super::*;

use crate::config::StorageConfig;
use crate::storage::gateway::GatewayState;
use std::path::{Path, PathBuf};
use storage::stores::CsvStorage;
use tracing::{error, info, warn};

/// Owns the customer records for one process run.
///
/// Construction loads the backing file; the collection is written back
/// exactly once, either by [`CustomerDataManager::shutdown`] or, failing
/// that, when the manager is dropped.
pub struct CustomerDataManager {
    store: RecordStore,
    gateway: PersistenceGateway,
}

pub struct ImportSummary {
    pub path: PathBuf,
    pub added: usize,
    /// Rows whose ID was already taken.
    pub skipped: usize,
    /// Rows whose fields fail validation.
    pub rejected: usize,
}

impl CustomerDataManager {
    pub fn new(config: &StorageConfig) -> Result<Self, AppError> {
        let backend = storage::parse_storage_type(config);
        Self::with_backend(backend, config.create_if_missing)
    }

    pub fn with_backend(
        backend: Box<dyn CustomerStore>,
        create_if_missing: bool,
    ) -> Result<Self, AppError> {
        let mut gateway = PersistenceGateway::new(backend, create_if_missing);
        let mut store = RecordStore::new();

        gateway.ensure_store_exists()?;
        gateway.load(&mut store)?;

        Ok(Self { store, gateway })
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        self.store.get_all()
    }

    pub fn customer_by_id(&self, id: i32) -> Option<&CustomerRecord> {
        self.store.get_by_id(id)
    }

    pub fn add_customer(&mut self, record: CustomerRecord) -> Result<(), AppError> {
        self.store.add(record)
    }

    pub fn edit_customer(&mut self, id: i32, fields: CustomerFields) -> Result<usize, AppError> {
        self.store.edit(id, fields)
    }

    pub fn set_observer(&mut self, observer: Box<dyn ChangeObserver>) {
        self.store.set_observer(observer);
    }

    pub fn clear_observer(&mut self) {
        self.store.clear_observer();
    }

    pub fn medium(&self) -> &str {
        self.gateway.medium()
    }

    pub fn data_file(&self) -> &Path {
        self.gateway.path()
    }

    /// Adds every valid row of a CSV file, keeping the file's row order at
    /// the front of the list. Rows whose id is already taken are skipped and
    /// rows with invalid fields are rejected; neither stops the import.
    pub fn import_from_csv(&mut self, path: Option<&Path>) -> Result<ImportSummary, AppError> {
        let source = CsvStorage::for_import(path)?;
        let rows = source.load()?;

        let mut added = 0;
        let mut skipped = 0;
        let mut rejected = 0;
        for record in rows.into_iter().rev() {
            if let Err(e) = record.fields().validate() {
                warn!(id = record.id(), error = %e, "rejecting imported customer");
                rejected += 1;
                continue;
            }

            match self.store.add(record) {
                Ok(()) => added += 1,
                Err(AppError::DuplicateId(id)) => {
                    info!(id, "skipping imported customer with existing ID");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(ImportSummary {
            path: source.path,
            added,
            skipped,
            rejected,
        })
    }

    pub fn export_to_csv(&self, path: Option<&Path>) -> Result<(PathBuf, usize), AppError> {
        let destination = CsvStorage::for_export(path)?;
        destination.save(self.customers())?;
        Ok((destination.path, self.customers().len()))
    }

    /// Writes the collection to the backing file. Consumes the manager so no
    /// mutation can follow the final write.
    pub fn shutdown(mut self) -> Result<(), AppError> {
        self.gateway.flush(self.store.get_all())
    }
}

impl Drop for CustomerDataManager {
    fn drop(&mut self) {
        if self.gateway.state() != GatewayState::Loaded {
            return;
        }
        // The gateway already logged the cause
        if self.gateway.flush(self.store.get_all()).is_err() {
            error!("customer data was not saved on exit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::stores::{JsonStorage, MemStorage};
    use std::{
        cell::{Cell, RefCell},
        fs,
        rc::Rc,
    };
    use tempfile::tempdir;

    struct Counter(Rc<RefCell<(usize, usize)>>);

    impl ChangeObserver for Counter {
        fn on_item_added(&mut self, _record: &CustomerRecord) {
            self.0.borrow_mut().0 += 1;
        }

        fn on_item_changed(&mut self, _index: usize, _record: &CustomerRecord) {
            self.0.borrow_mut().1 += 1;
        }
    }

    struct CountingStore {
        path: PathBuf,
        saves: Rc<Cell<usize>>,
    }

    impl CustomerStore for CountingStore {
        fn load(&self) -> Result<Vec<CustomerRecord>, AppError> {
            Ok(vec![customer(1, "Loaded")])
        }

        fn save(&self, _records: &[CustomerRecord]) -> Result<(), AppError> {
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }

        fn get_medium(&self) -> &str {
            "counting"
        }

        fn path(&self) -> &Path {
            &self.path
        }

        fn create_if_missing(&self) -> Result<bool, AppError> {
            Ok(false)
        }
    }

    fn customer(id: i32, name: &str) -> CustomerRecord {
        CustomerRecord::new(id, name, "647-967 8119", "ankit@gmail.com", "m9a4y1")
    }

    #[test]
    fn shutdown_then_reload_round_trips() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("customers.jsonl");

        let mut manager = CustomerDataManager::with_backend(Box::new(JsonStorage::new(&path)), true)?;
        manager.add_customer(customer(1, "One"))?;
        manager.add_customer(customer(2, "Two"))?;
        manager.edit_customer(1, CustomerFields::new("Uno", "1", "u@x.com", "1"))?;
        let before = manager.customers().to_vec();
        manager.shutdown()?;

        let reloaded = CustomerDataManager::with_backend(Box::new(JsonStorage::new(&path)), true)?;

        assert_eq!(reloaded.customers(), before.as_slice());
        Ok(())
    }

    #[test]
    fn drop_flushes_when_shutdown_is_skipped() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("customers.jsonl");

        {
            let mut manager =
                CustomerDataManager::with_backend(Box::new(JsonStorage::new(&path)), true)?;
            manager.add_customer(customer(5, "Five"))?;
        }

        assert_eq!(JsonStorage::new(&path).load()?, vec![customer(5, "Five")]);
        Ok(())
    }

    #[test]
    fn shutdown_writes_once() -> Result<(), AppError> {
        let saves = Rc::new(Cell::new(0));
        let backend = CountingStore {
            path: PathBuf::from("counting"),
            saves: Rc::clone(&saves),
        };

        let manager = CustomerDataManager::with_backend(Box::new(backend), true)?;
        assert_eq!(manager.customers(), &[customer(1, "Loaded")]);
        manager.shutdown()?;

        assert_eq!(saves.get(), 1);
        Ok(())
    }

    #[test]
    fn corrupt_file_aborts_construction() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("customers.jsonl");
        fs::write(&path, "not a header\n")?;

        let result = CustomerDataManager::with_backend(Box::new(JsonStorage::new(&path)), true);

        assert!(matches!(result, Err(AppError::Corrupt(_))));
        assert_eq!(fs::read_to_string(&path)?, "not a header\n");
        Ok(())
    }

    #[test]
    fn observer_counts_successful_calls() -> Result<(), AppError> {
        let counts = Rc::new(RefCell::new((0, 0)));
        let mut manager =
            CustomerDataManager::with_backend(Box::new(MemStorage::new("unused")), true)?;
        manager.set_observer(Box::new(Counter(Rc::clone(&counts))));

        manager.add_customer(customer(1, "A"))?;
        assert!(manager.add_customer(customer(1, "B")).is_err());
        manager.edit_customer(1, CustomerFields::new("C", "2", "c@x.com", "2"))?;
        assert!(manager.edit_customer(4, CustomerFields::default()).is_err());

        assert_eq!(*counts.borrow(), (1, 1));
        Ok(())
    }

    #[test]
    fn csv_import_keeps_row_order_and_skips_taken_ids() -> Result<(), AppError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("in.csv");
        fs::write(
            &csv_path,
            "id,name,phone,email,postal_code\n\
            10,Ten,555-0010,ten@x.com,10101\n\
            11,Eleven,555-0011,eleven@x.com,11111\n\
            1,Clash,555-0099,clash@x.com,99999\n",
        )?;

        let mut manager =
            CustomerDataManager::with_backend(Box::new(MemStorage::new("unused")), true)?;
        manager.add_customer(customer(1, "Existing"))?;

        let summary = manager.import_from_csv(Some(&csv_path))?;

        assert_eq!((summary.added, summary.skipped, summary.rejected), (2, 1, 0));
        let ids: Vec<i32> = manager.customers().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![10, 11, 1]);
        assert_eq!(manager.customer_by_id(1).map(|c| c.name()), Some("Existing"));
        Ok(())
    }

    #[test]
    fn csv_import_rejects_rows_that_fail_validation() -> Result<(), AppError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("in.csv");
        fs::write(
            &csv_path,
            "id,name,phone,email,postal_code\n\
            7,,CALL-ME,,\n\
            8,Eight,555-0008,eight@x.com,80808\n",
        )?;

        let counts = Rc::new(RefCell::new((0, 0)));
        let mut manager =
            CustomerDataManager::with_backend(Box::new(MemStorage::new("unused")), true)?;
        manager.set_observer(Box::new(Counter(Rc::clone(&counts))));

        let summary = manager.import_from_csv(Some(&csv_path))?;

        assert_eq!((summary.added, summary.skipped, summary.rejected), (1, 0, 1));
        assert!(manager.customer_by_id(7).is_none());
        assert_eq!(manager.customers().len(), 1);
        assert_eq!(*counts.borrow(), (1, 0));
        Ok(())
    }

    #[test]
    fn csv_export_lists_current_order() -> Result<(), AppError> {
        let dir = tempdir()?;
        let mut manager =
            CustomerDataManager::with_backend(Box::new(MemStorage::new("unused")), true)?;
        manager.add_customer(customer(1, "First"))?;
        manager.add_customer(customer(2, "Second"))?;

        let (path, total) = manager.export_to_csv(Some(dir.path()))?;

        assert_eq!(total, 2);
        let exported = fs::read_to_string(path)?;
        let lines: Vec<&str> = exported.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2,Second,"));
        assert!(lines[2].starts_with("1,First,"));
        Ok(())
    }
}
