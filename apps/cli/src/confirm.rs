//! # Confirmation Prompts
//!
//! Destructive actions run only after a [`Confirmer`] says yes.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Delete product                               │
//! │ Remove "DIPIRONA" from the inventory? ...    │
//! │ Delete? [y/N] _                              │
//! └──────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use pex_core::DestructiveAction;

/// Decides whether a destructive action goes ahead.
pub trait Confirmer {
    fn confirm(&mut self, action: &DestructiveAction) -> io::Result<bool>;
}

/// Asks on a terminal. The prompt goes to `output` (stderr in the binary)
/// so stdout stays clean for command output.
pub struct PromptConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        PromptConfirmer { input, output }
    }
}

impl PromptConfirmer<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr and reads the answer from stdin.
    pub fn stdio() -> Self {
        PromptConfirmer::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirmer for PromptConfirmer<R, W> {
    fn confirm(&mut self, action: &DestructiveAction) -> io::Result<bool> {
        writeln!(self.output, "{}", action.title())?;
        writeln!(self.output, "{}", action.message())?;
        write!(self.output, "{}? [y/N] ", action.confirm_label())?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

/// Always confirms (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&mut self, _action: &DestructiveAction) -> io::Result<bool> {
        Ok(true)
    }
}

/// Accepts y/yes and the Portuguese s/sim, any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

/// Reads one line after printing `label`; used for the login prompt.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
