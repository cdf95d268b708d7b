//! Boundary with whatever turns a statement document into plain text.

use std::fs;
use std::path::{Path, PathBuf};

/// Failure to produce statement text. The parser is never run when this
/// happens.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no pages to extract")]
    NoPages,

    #[error("could not read {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", .path.display())]
    NotUtf8 { path: PathBuf },
}

/// Anything that can hand over the full text of one statement.
pub trait TextSource {
    fn extract_text(&self) -> Result<String, ExtractError>;
}

/// Concatenate page texts, each followed by a newline.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut all = String::new();
    for page in pages {
        all.push_str(page.as_ref());
        all.push('\n');
    }
    all
}

/// Already-extracted text files, one per page, in page order.
#[derive(Debug, Clone)]
pub struct PlainTextPages {
    paths: Vec<PathBuf>,
}

impl PlainTextPages {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }
}

impl TextSource for PlainTextPages {
    fn extract_text(&self) -> Result<String, ExtractError> {
        if self.paths.is_empty() {
            return Err(ExtractError::NoPages);
        }

        let mut pages = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let bytes = fs::read(path).map_err(|source| ExtractError::Unreadable {
                path: path.clone(),
                source,
            })?;
            let page = String::from_utf8(bytes)
                .map_err(|_| ExtractError::NotUtf8 { path: path.clone() })?;
            tracing::debug!(path = %path.display(), bytes = page.len(), "read page");
            pages.push(page);
        }

        Ok(join_pages(pages))
    }
}
