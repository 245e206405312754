//! Clipboard access for copying the rendered tree.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard via `arboard`. A handle is opened per write so a
/// missing display only fails the copy, not startup.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Keeps the last written text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write, like a denied browser permission.
    pub fn denied() -> Self {
        Self {
            contents: None,
            deny: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Write("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
