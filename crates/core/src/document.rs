//! Grounding document access.

/// A source of the grounding text that backs the system prompt.
///
/// Implementations are best-effort: a missing or unreadable backing
/// source must yield an empty string, never an error. The agent reads
/// both documents again on every turn, so external changes to them are
/// picked up without a restart.
pub trait DocumentSource: Send + Sync {
    /// Returns the persona's summary text.
    fn summary_text(&self) -> String;

    /// Returns the persona's profile text.
    fn profile_text(&self) -> String;
}

/// A [`DocumentSource`] with no backing documents.
///
/// Prompt construction degrades to blank grounding sections.
pub struct NoDocuments;

impl DocumentSource for NoDocuments {
    #[inline]
    fn summary_text(&self) -> String {
        String::new()
    }

    #[inline]
    fn profile_text(&self) -> String {
        String::new()
    }
}
