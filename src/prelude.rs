pub use crate::cli::{command, run_app};
pub use crate::config::StorageConfig;
pub use crate::domain::{
    ChangeNotifier, ChangeObserver, CustomerFields, CustomerRecord, RecordStore,
    customer::{self, ValidationReq},
    manager::{self, CustomerDataManager, ImportSummary},
};
pub use crate::errors::AppError;
pub use crate::storage::{
    self, CustomerStore, StorageMediums,
    gateway::{GatewayState, PersistenceGateway},
    stores,
};
