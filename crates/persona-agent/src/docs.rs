//! Grounding material loading.

use std::error::Error as StdError;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use persona_agent_core::document::DocumentSource;

const PROFILE_FILE: &str = "profile.pdf";
const SUMMARY_FILE: &str = "summary.txt";

/// Loads the persona's grounding documents from a materials directory.
///
/// Loading is best-effort: a missing or unreadable file yields empty
/// text with a warning, never an error. The agent asks for the text
/// again on every turn, so edits to the files are picked up live.
pub struct Materials {
    dir: PathBuf,
}

impl Materials {
    /// Creates a loader rooted at the given directory.
    #[inline]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSource for Materials {
    fn summary_text(&self) -> String {
        let path = self.dir.join(SUMMARY_FILE);
        match std::fs::read_to_string(&path) {
            Ok(text) => text.trim().to_owned(),
            Err(err) => {
                warn!("could not read {}: {err}", path.display());
                String::new()
            }
        }
    }

    fn profile_text(&self) -> String {
        let path = self.dir.join(PROFILE_FILE);
        match extract_pdf_text(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!("could not read {}: {err}", path.display());
                String::new()
            }
        }
    }
}

/// Extracts all text from a PDF file, page by page.
fn extract_pdf_text(path: &Path) -> Result<String, Box<dyn StdError>> {
    let bytes = std::fs::read(path)?;
    let reader =
        oxidize_pdf::parser::reader::PdfReader::new(Cursor::new(bytes))?;
    let doc = oxidize_pdf::parser::document::PdfDocument::new(reader);

    let page_count = doc.page_count()?;
    let mut all_text = String::new();
    for page in 0..page_count {
        match doc.extract_text_from_page(page) {
            Ok(extracted) => {
                if !all_text.is_empty() && !extracted.text.is_empty() {
                    all_text.push('\n');
                }
                all_text.push_str(&extracted.text);
            }
            Err(err) => {
                // Scanned or image-only pages fail to extract; skip them.
                warn!("skipping page {page} of {}: {err}", path.display());
            }
        }
    }
    Ok(all_text.trim().to_owned())
}
