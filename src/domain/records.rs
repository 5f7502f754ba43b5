use super::*;

/// In-memory, ordered collection of customer records.
///
/// New records go to the front; edited records keep their position. The
/// store performs no I/O and never logs, it only reports results.
#[derive(Default)]
pub struct RecordStore {
    records: Vec<CustomerRecord>,
    notifier: ChangeNotifier,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn get_all(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn get_by_id(&self, id: i32) -> Option<&CustomerRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn position_of(&self, id: i32) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, record: CustomerRecord) -> Result<(), AppError> {
        if self.position_of(record.id()).is_some() {
            return Err(AppError::DuplicateId(record.id()));
        }

        self.records.insert(0, record);
        self.notifier.notify_added(&self.records[0]);
        Ok(())
    }

    /// Replaces the record with `id` in place and returns its index.
    pub fn edit(&mut self, id: i32, fields: CustomerFields) -> Result<usize, AppError> {
        let Some(index) = self.position_of(id) else {
            return Err(AppError::NotFound(format!("Customer with ID {}", id)));
        };

        self.records[index] = CustomerRecord::from_fields(id, fields);
        self.notifier.notify_changed(index, &self.records[index]);
        Ok(index)
    }

    /// Appends records read from storage, in storage order, without
    /// notifying. A repeated id means the backing data is not trustworthy.
    pub fn extend_loaded(&mut self, records: Vec<CustomerRecord>) -> Result<usize, AppError> {
        let mut seen: HashSet<i32> = self.records.iter().map(|r| r.id()).collect();

        for record in &records {
            if !seen.insert(record.id()) {
                return Err(AppError::Corrupt(format!(
                    "customer ID {} appears more than once",
                    record.id()
                )));
            }
        }

        let count = records.len();
        self.records.extend(records);
        Ok(count)
    }

    pub fn set_observer(&mut self, observer: Box<dyn ChangeObserver>) {
        self.notifier.set_observer(observer);
    }

    pub fn clear_observer(&mut self) {
        self.notifier.clear_observer();
    }
}
