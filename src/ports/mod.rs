//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PersistenceGateway` - key/value store receiving the finished assessment

mod persistence_gateway;

pub use persistence_gateway::{PersistenceError, PersistenceGateway, ASSESSMENT_STORAGE_KEY};
