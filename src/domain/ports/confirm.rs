//! Overwrite Confirmation Port
//!
//! Asked once per run, before any transfer, when files already exist at the
//! destination and unattended mode is off.

use thiserror::Error;

/// What the operator is asked to approve
#[derive(Debug, Clone)]
pub struct OverwritePrompt<'a> {
    /// Destination description (e.g. `deploy@example.com:/var/www`)
    pub destination: &'a str,
    /// Relative paths that already exist remotely
    pub existing: &'a [String],
}

/// Failure to obtain an answer
#[derive(Error, Debug)]
pub enum ConfirmError {
    /// No terminal to prompt on
    #[error("{count} files already exist on the destination and no terminal is available to confirm; re-run with --yes to overwrite")]
    NotInteractive { count: usize },

    /// The prompt itself failed
    #[error("confirmation prompt failed: {0}")]
    Prompt(String),
}

/// Trait for gating overwrites of existing remote files.
///
/// Returning `Ok(false)` cancels the whole run.
pub trait OverwriteConfirmer {
    fn confirm_overwrite(&self, prompt: &OverwritePrompt<'_>) -> Result<bool, ConfirmError>;
}
