//! # Bulk Import Service
//!
//! Submits parsed candidates to the catalog one at a time. A rejected record
//! is counted and skipped; it never stops the records after it. Failing to
//! read the file aborts the import before anything is submitted.

use super::http::MoviesApi;
use crate::repl::models::{MovieStore, NewMovie};
use crate::repl::utils::ImportDocument;
use encoding_rs::{Encoding, UTF_8};
use std::path::{Path, PathBuf};

/// Success and failure counts of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportTally {
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportTally {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// One-line summary for the user
    pub fn summary(&self) -> String {
        format!("Imported: {}, Failed: {}", self.succeeded, self.failed)
    }
}

/// Errors that abort a whole import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Error reading file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve an encoding label such as `windows-1251`
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    let encoding = Encoding::for_label(label.trim().as_bytes());
    if encoding.is_none() {
        tracing::warn!("Unknown import encoding '{}', falling back to UTF-8", label);
    }
    encoding
}

/// Decode import bytes
///
/// A byte order mark wins; otherwise valid UTF-8 is used as is and anything
/// else is decoded with `fallback` (UTF-8 with replacement characters when
/// no fallback is configured).
pub fn decode_import_text(bytes: &[u8], fallback: Option<&'static Encoding>) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => {
            let encoding = fallback.unwrap_or(UTF_8);
            tracing::debug!("Import file is not UTF-8, decoding as {}", encoding.name());
            let (text, _, had_errors) = encoding.decode(bytes);
            if had_errors {
                tracing::warn!("Import file contained bytes invalid in {}", encoding.name());
            }
            text.into_owned()
        }
    }
}

/// Read and decode an import file
pub async fn read_import_file(
    path: &Path,
    fallback: Option<&'static Encoding>,
) -> Result<String, ImportError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_import_text(&bytes, fallback))
}

/// Sequential submitter for import candidates
pub struct BulkImporter<'a, A: MoviesApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: MoviesApi + ?Sized> BulkImporter<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Submit candidates in order, appending each created movie to `store`
    ///
    /// Each create finishes before the next one starts.
    pub async fn submit_all<I>(&self, candidates: I, store: &mut MovieStore) -> ImportTally
    where
        I: IntoIterator<Item = NewMovie>,
    {
        let mut tally = ImportTally::default();

        for candidate in candidates {
            match self.api.create_movie(&candidate).await {
                Ok(movie) => {
                    tracing::debug!(id = movie.id, title = %movie.title, "Imported movie");
                    store.append(movie);
                    tally.succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!(title = %candidate.title, error = %e, "Failed to add movie");
                    tally.failed += 1;
                }
            }
        }

        tracing::info!("Import finished: {}", tally.summary());
        tally
    }

    /// Parse `text` and submit every valid block
    pub async fn import_text(&self, text: &str, store: &mut MovieStore) -> ImportTally {
        let document = ImportDocument::new(text);
        self.submit_all(document.candidates(), store).await
    }

    /// Read, parse and submit an import file
    pub async fn import_file(
        &self,
        path: &Path,
        fallback: Option<&'static Encoding>,
        store: &mut MovieStore,
    ) -> Result<ImportTally, ImportError> {
        let text = read_import_file(path, fallback).await.inspect_err(|e| {
            tracing::error!("{}", e);
        })?;
        Ok(self.import_text(&text, store).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::MovieFormat;
    use crate::repl::testing::InMemoryMoviesApi;
    use std::io::Write;

    fn candidate(title: &str) -> NewMovie {
        NewMovie::new(title, 2000, MovieFormat::Dvd, vec!["Someone".to_string()])
    }

    #[tokio::test]
    async fn submit_all_should_count_failures_and_continue() {
        let api = InMemoryMoviesApi::new();
        api.reject_title("Broken");
        let mut store = MovieStore::new();

        let tally = BulkImporter::new(&api)
            .submit_all(
                vec![candidate("One"), candidate("Broken"), candidate("Two")],
                &mut store,
            )
            .await;

        assert_eq!(tally, ImportTally { succeeded: 2, failed: 1 });
        let titles: Vec<&str> = store.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn submit_all_should_keep_submission_order() {
        let api = InMemoryMoviesApi::new();
        let mut store = MovieStore::new();

        BulkImporter::new(&api)
            .submit_all(vec![candidate("Zulu"), candidate("Alpha")], &mut store)
            .await;

        assert_eq!(api.created_titles(), vec!["Zulu", "Alpha"]);
        let titles: Vec<&str> = store.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Zulu", "Alpha"]);
    }

    #[tokio::test]
    async fn duplicate_titles_should_fail_individually() {
        let api = InMemoryMoviesApi::new();
        let mut store = MovieStore::new();

        let tally = BulkImporter::new(&api)
            .submit_all(vec![candidate("Same"), candidate("Same")], &mut store)
            .await;

        assert_eq!(tally.succeeded, 1);
        assert_eq!(tally.failed, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn import_file_should_abort_when_file_is_missing() {
        let api = InMemoryMoviesApi::new();
        let mut store = MovieStore::new();
        let dir = tempfile::tempdir().unwrap();

        let result = BulkImporter::new(&api)
            .import_file(&dir.path().join("missing.txt"), None, &mut store)
            .await;

        assert!(matches!(result, Err(ImportError::Read { .. })));
        assert!(api.created_titles().is_empty());
    }

    #[tokio::test]
    async fn import_file_should_parse_and_submit_blocks() {
        let api = InMemoryMoviesApi::new();
        let mut store = MovieStore::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Title: Go\nRelease Year: 2009\nFormat: DVD\nStars: A, B\n\nTitle: Bad\nFormat: DVD\n"
        )
        .unwrap();

        let tally = BulkImporter::new(&api)
            .import_file(file.path(), None, &mut store)
            .await
            .unwrap();

        assert_eq!(tally, ImportTally { succeeded: 1, failed: 0 });
        assert_eq!(store.movies()[0].title, "Go");
    }

    #[tokio::test]
    async fn out_of_range_year_should_be_submitted_and_counted_as_failed() {
        let api = InMemoryMoviesApi::new();
        let mut store = MovieStore::new();
        let text = "Title: Far Future\nRelease Year: 3000000000\nFormat: DVD\nStars: A\n\n\
                    Title: Go\nRelease Year: 2009\nFormat: DVD\nStars: B";

        let tally = BulkImporter::new(&api).import_text(text, &mut store).await;

        assert_eq!(tally, ImportTally { succeeded: 1, failed: 1 });
        assert_eq!(api.created_titles(), vec!["Far Future", "Go"]);
        assert_eq!(store.movies()[0].title, "Go");
    }

    #[test]
    fn decode_should_strip_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFTitle: Go";
        assert_eq!(decode_import_text(bytes, None), "Title: Go");
    }

    #[test]
    fn decode_should_use_fallback_for_non_utf8() {
        // "Жах" in windows-1251
        let bytes = [0xC6, 0xE0, 0xF5];
        let encoding = encoding_for_label("windows-1251");
        assert_eq!(decode_import_text(&bytes, encoding), "Жах");
    }

    #[test]
    fn tally_summary_should_report_counts() {
        let tally = ImportTally { succeeded: 3, failed: 2 };
        assert_eq!(tally.summary(), "Imported: 3, Failed: 2");
        assert_eq!(tally.total(), 5);
    }
}
