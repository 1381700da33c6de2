mod chat;
mod overlay;

pub use chat::ChatSink;
pub use overlay::HtmlOverlay;

use champ_reveal_lcu::ClientError;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("Unable to look up the champion select conversation: {0}")]
    Conversation(#[source] ClientError),
    #[error("No champion select conversation is open")]
    NoConversation,
    #[error("Failed to write the overlay at {path:?}: {source}")]
    Overlay {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Panel handle of generation {generation} is no longer shown")]
    StaleHandle { generation: u64 },
}

/// Proof that a panel is currently shown. Only the sink that issued it may consume it.
#[derive(Debug, PartialEq, Eq)]
pub struct PanelHandle {
    generation: u64,
}

impl PanelHandle {
    pub(crate) fn new(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// An overlay that shows the roster of the current champion select.
pub trait PanelSink: Send {
    /// Shows the panel in its loading state.
    fn show(&mut self, generation: u64) -> Result<PanelHandle, SinkError>;

    fn populate(&mut self, handle: &PanelHandle, lines: &[String], links_html: &str) -> Result<(), SinkError>;

    /// Removes the panel. Idempotent with respect to what is on screen.
    fn hide(&mut self, handle: PanelHandle) -> Result<(), SinkError>;
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
