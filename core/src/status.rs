//! Single-slot status line.
//!
//! Holds the outcome of the most recent action. Every report overwrites the
//! previous message; nothing is queued or kept as history.

use serde::Serialize;

/// One status line and whether it reports a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Last-write-wins holder for the current [`StatusMessage`].
///
/// Empty until the first report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusSlot(Option<StatusMessage>);

impl StatusSlot {
    /// Overwrite the slot.
    pub fn report(&mut self, text: impl Into<String>, is_error: bool) {
        self.0 = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    /// Overwrite the slot with a prepared message.
    pub fn set(&mut self, message: StatusMessage) {
        self.0 = Some(message);
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.0.as_ref()
    }

    /// Whether the live message is flagged as an error.
    pub fn is_error(&self) -> bool {
        self.0.as_ref().is_some_and(|m| m.is_error)
    }
}
