//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `storage` - PersistenceGateway implementations (file, in-memory)
//! - `terminal` - Interactive line-based wizard host

pub mod storage;
pub mod terminal;

pub use storage::{FileGateway, InMemoryGateway};
pub use terminal::{TerminalError, TerminalWizard, WizardOutcome};
