//! Terminal confirmation prompts

use std::io::{BufRead, Write};

use zwatch_core::controller::Confirm;

/// Asks on stderr and reads a `y`/`yes` answer from stdin
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = std::io::stdin();
        let mut stderr = std::io::stderr();
        ask(prompt, &mut stdin.lock(), &mut stderr)
    }
}

/// Answers every prompt with a fixed reply (`--yes`)
#[derive(Debug)]
pub struct FixedConfirm(pub bool);

impl Confirm for FixedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("Answering '{}' with {}", prompt, self.0);
        self.0
    }
}

fn ask(prompt: &str, input: &mut dyn BufRead, output: &mut dyn Write) -> bool {
    if write!(output, "{} [y/N] ", prompt)
        .and_then(|_| output.flush())
        .is_err()
    {
        return false;
    }
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
