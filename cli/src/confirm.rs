use async_trait::async_trait;
use uploadhub_core::sync::Confirm;

use crate::input::LineSource;

/// Asks on stderr and reads the answer from the shared stdin lines.
///
/// Only `y` / `yes` (any case) confirm; EOF declines.
pub struct TerminalConfirm {
    lines: LineSource,
}

impl TerminalConfirm {
    pub fn new(lines: LineSource) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        match self.lines.next_line().await {
            Some(answer) => is_yes(&answer),
            None => false,
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
