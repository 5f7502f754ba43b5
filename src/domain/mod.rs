pub mod customer;
pub mod manager;
pub mod notifier;
pub mod records;

use crate::errors::AppError;
use crate::storage::{self, CustomerStore, gateway::PersistenceGateway};
use std::collections::HashSet;

pub use customer::{CustomerFields, CustomerRecord};
pub use notifier::{ChangeNotifier, ChangeObserver};
pub use records::RecordStore;
