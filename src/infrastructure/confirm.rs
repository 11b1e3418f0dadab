//! Terminal Overwrite Confirmer
//!
//! Lists the files that already exist remotely on stderr and asks a yes/no
//! question. Without a terminal on stdin the run fails instead of silently
//! overwriting or silently skipping.

use dialoguer::Confirm;
use is_terminal::IsTerminal;

use crate::domain::ports::{ConfirmError, OverwriteConfirmer, OverwritePrompt};

/// Number of existing paths printed before "... and N more"
const PREVIEW_LIMIT: usize = 10;

/// Interactive confirmer backed by `dialoguer`
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmer;

impl TerminalConfirmer {
    pub fn new() -> Self {
        Self
    }
}

impl OverwriteConfirmer for TerminalConfirmer {
    fn confirm_overwrite(&self, prompt: &OverwritePrompt<'_>) -> Result<bool, ConfirmError> {
        if !std::io::stdin().is_terminal() {
            return Err(ConfirmError::NotInteractive {
                count: prompt.existing.len(),
            });
        }

        eprint!("{}", render_preview(prompt));

        Confirm::new()
            .with_prompt(format!(
                "Overwrite {} existing file(s) on {}?",
                prompt.existing.len(),
                prompt.destination
            ))
            .default(false)
            .interact()
            .map_err(|e| ConfirmError::Prompt(e.to_string()))
    }
}

fn render_preview(prompt: &OverwritePrompt<'_>) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "These files already exist on {}:\n",
        prompt.destination
    ));
    for path in prompt.existing.iter().take(PREVIEW_LIMIT) {
        out.push_str("  ");
        out.push_str(path);
        out.push('\n');
    }
    if prompt.existing.len() > PREVIEW_LIMIT {
        out.push_str(&format!(
            "  ... and {} more\n",
            prompt.existing.len() - PREVIEW_LIMIT
        ));
    }
    out
}
