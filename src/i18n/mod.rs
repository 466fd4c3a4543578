//! Internationalization (i18n) helpers.
//!
//! This module bundles the two independent pieces a request handler needs to
//! localize a response: ranking the client's `Accept-Language` preferences and
//! translating dotted keys from a JSON document.
//!
//! # Architecture
//!
//! - `accept_language`: `Accept-Language` parsing into ranked preferences
//! - `document`: Immutable JSON tree with dotted-path lookup
//! - `format`: printf-style formatting of translated templates
//! - `translator`: Language-aware key lookup with fallback to the key
//!
//! # Example
//!
//! ```rust
//! use json_i18n::i18n::{base_language, parse_accept_language, Translator};
//!
//! let translator = Translator::from_buffer(br#"{"en": {"hello": "Hello %s"}}"#)?;
//!
//! let preferences = parse_accept_language("fr;q=0.4,en-GB;q=0.9");
//! let language = base_language(&preferences[0]);
//!
//! let localized = translator.with_language(language);
//! assert_eq!(localized.t("hello", &["Anna".into()]), "Hello Anna");
//! # Ok::<(), json_i18n::i18n::TranslatorError>(())
//! ```

mod accept_language;
mod document;
mod format;
mod translator;

pub use accept_language::{base_language, parse_accept_language, LanguagePreference};
pub use document::TranslationDocument;
pub use format::{sprintf, FormatArg};
pub use translator::{Translator, TranslatorError, DEFAULT_LANGUAGE};
