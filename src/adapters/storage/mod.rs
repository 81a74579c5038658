//! Storage Adapters
//!
//! Implementations of the PersistenceGateway port.
//!
//! ## Available Adapters
//!
//! - **FileGateway** - Stores each key as a JSON file on disk
//! - **InMemoryGateway** - Stores values in memory (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileGateway, InMemoryGateway};
//!
//! // Durable: file-based storage
//! let gateway = FileGateway::new("./data");
//!
//! // Testing: in-memory storage
//! let gateway = InMemoryGateway::new();
//! ```

mod file_gateway;
mod in_memory_gateway;

pub use file_gateway::FileGateway;
pub(crate) use file_gateway::validate_key;
pub use in_memory_gateway::InMemoryGateway;
