use super::*;

/// Receives store mutations as they happen.
///
/// Both callbacks run synchronously, after the store already reflects the
/// change and before the mutating call returns.
pub trait ChangeObserver {
    /// A record was inserted at index 0.
    fn on_item_added(&mut self, record: &CustomerRecord);

    /// The record at `index` was replaced by `record`.
    fn on_item_changed(&mut self, index: usize, record: &CustomerRecord);
}

/// Single-slot observer hook. Setting a new observer replaces the old one.
#[derive(Default)]
pub struct ChangeNotifier {
    observer: Option<Box<dyn ChangeObserver>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self { observer: None }
    }

    pub fn set_observer(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    pub fn notify_added(&mut self, record: &CustomerRecord) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_item_added(record);
        }
    }

    pub fn notify_changed(&mut self, index: usize, record: &CustomerRecord) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_item_changed(index, record);
        }
    }
}
