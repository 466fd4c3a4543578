//! Key-based translator backed by a nested JSON document.
//!
//! Keys are dotted paths below a language branch: with language `"de"` the
//! key `"global.username"` resolves `de.global.username`. Lookups never fail;
//! anything that does not resolve to a string falls back to the key itself.

use crate::i18n::format::{sprintf, FormatArg};
use crate::i18n::TranslationDocument;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Language used by [`Translator::new`] and every translator loaded from a buffer or file.
pub const DEFAULT_LANGUAGE: &str = "de";

/// Errors raised while constructing a [`Translator`].
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// The translation file could not be read.
    #[error("failed to read translation file '{}'", path.display())]
    Io {
        /// Path handed to the file reader.
        path: PathBuf,
        /// Error returned by the file reader, unchanged.
        #[source]
        source: io::Error,
    },

    /// The translation document is not well-formed JSON.
    #[error("failed to parse translation document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Translator handle: a shared document plus the language used by [`Translator::t`].
///
/// Cloning or switching language never copies the document.
#[derive(Debug, Clone)]
pub struct Translator {
    document: Option<Arc<TranslationDocument>>,
    language: String,
}

impl Translator {
    /// Create a translator without a document, using [`DEFAULT_LANGUAGE`].
    ///
    /// Every lookup on such a translator falls back to the key.
    pub fn new() -> Self {
        Self {
            document: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Create a translator from a JSON buffer.
    ///
    /// # Errors
    /// Returns [`TranslatorError::Parse`] if the buffer is not valid JSON.
    pub fn from_buffer(buf: &[u8]) -> Result<Self, TranslatorError> {
        let document = TranslationDocument::from_slice(buf)?;
        info!(
            "Loaded translation document with {} languages",
            document.languages().len()
        );

        Ok(Self {
            document: Some(Arc::new(document)),
            ..Self::new()
        })
    }

    /// Create a translator from a JSON file on disk.
    ///
    /// # Errors
    /// Returns [`TranslatorError::Io`] if the file cannot be read and
    /// [`TranslatorError::Parse`] if its content is not valid JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TranslatorError> {
        Self::from_file_with(path, |path| std::fs::read(path))
    }

    /// Create a translator from a file, reading it through `reader`.
    ///
    /// The reader receives the path and returns the whole file content.
    /// Its error is kept as the source of [`TranslatorError::Io`].
    ///
    /// # Example
    /// ```
    /// use json_i18n::i18n::Translator;
    ///
    /// let translator = Translator::from_file_with("de.json", |_| {
    ///     Ok(br#"{"de": {"hello": "Hallo"}}"#.to_vec())
    /// })
    /// .unwrap();
    /// assert_eq!(translator.t("hello", &[]), "Hallo");
    /// ```
    pub fn from_file_with<P, R>(path: P, reader: R) -> Result<Self, TranslatorError>
    where
        P: AsRef<Path>,
        R: FnOnce(&Path) -> io::Result<Vec<u8>>,
    {
        let path = path.as_ref();
        let buf = reader(path).map_err(|source| TranslatorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_buffer(&buf)
    }

    /// Return a new translator sharing this document but using `language`.
    ///
    /// The receiver keeps its own language.
    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            document: self.document.clone(),
            language: language.into(),
        }
    }

    /// Language used by [`Translator::t`].
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Language branches present in the document, empty without a document.
    pub fn languages(&self) -> Vec<&str> {
        self.document
            .as_deref()
            .map(TranslationDocument::languages)
            .unwrap_or_default()
    }

    /// Translate `key` in the current language.
    pub fn t(&self, key: &str, args: &[FormatArg]) -> String {
        self.tl(&self.language, key, args)
    }

    /// Translate `key` in `language`, formatting the result with `args`.
    ///
    /// Returns `key` unchanged when the path is missing or does not hold a string.
    pub fn tl(&self, language: &str, key: &str, args: &[FormatArg]) -> String {
        let path = format!("{}.{}", language, key);

        match self.document.as_deref().and_then(|doc| doc.get_str(&path)) {
            Some(template) => sprintf(template, args),
            None => {
                debug!("No translation for '{}', falling back to key", path);
                key.to_string()
            }
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
