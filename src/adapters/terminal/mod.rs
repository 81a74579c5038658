//! Terminal host for the assessment wizard.

mod wizard;

pub use wizard::{TerminalError, TerminalWizard, WizardOutcome};
