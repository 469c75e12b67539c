use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Something that can receive copied text. Implementations are called from
/// a blocking task.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. A handle is opened for each write and released
/// as soon as the write returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// Copy `text`, reporting only whether it worked.
pub async fn copy(writer: Arc<dyn ClipboardWriter>, text: String) -> bool {
    let chars = text.chars().count();
    match tokio::task::spawn_blocking(move || writer.write_text(&text)).await {
        Ok(Ok(())) => {
            info!("Copied {} chars to clipboard", chars);
            true
        }
        Ok(Err(e)) => {
            warn!("Failed to copy: {}", e);
            false
        }
        Err(e) => {
            error!("Clipboard task failed: {}", e);
            false
        }
    }
}
