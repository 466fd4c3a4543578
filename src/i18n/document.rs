//! Translation document: an immutable JSON tree addressed by dotted paths.
//!
//! A path such as `"de.global.username"` descends one segment at a time.
//! Objects are indexed by key and arrays by decimal index. A literal `.` inside
//! a key is written as `~1` and a literal `~` as `~0`.

use serde_json::Value;

/// Parsed translation tree.
///
/// Only read accessors are exposed, so a document can be shared behind an
/// `Arc` by any number of translators and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationDocument {
    root: Value,
}

impl TranslationDocument {
    /// Parse a JSON byte buffer into a document.
    pub fn from_slice(buf: &[u8]) -> Result<Self, serde_json::Error> {
        let root = serde_json::from_slice(buf)?;
        Ok(Self { root })
    }

    /// Resolve a dotted path to the value stored there.
    ///
    /// # Returns
    /// * `Some(&Value)` if every segment resolved
    /// * `None` if a segment is missing or descends into a scalar
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.root, |node, segment| {
            let segment = unescape_segment(segment);
            match node {
                Value::Object(map) => map.get(segment.as_str()),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            }
        })
    }

    /// Resolve a dotted path to a string leaf.
    ///
    /// Returns `None` when the path is missing or holds anything other than a
    /// string, including a nested object.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Top-level keys of the document, i.e. the available language branches.
    pub fn languages(&self) -> Vec<&str> {
        match &self.root {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

fn unescape_segment(segment: &str) -> String {
    // ~1 first so "~01" decodes to "~1" rather than "."
    segment.replace("~1", ".").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> TranslationDocument {
        TranslationDocument::from_slice(
            br#"{
                "de": {
                    "global": {"username": "Benutzername"},
                    "units": {"km.h": "Kilometer pro Stunde", "a~b": "Tilde"},
                    "weekdays": ["Montag", "Dienstag"],
                    "count": 3
                },
                "en": {"global": {"username": "Username"}}
            }"#,
        )
        .expect("valid document")
    }

    #[test]
    fn test_get_str_nested() {
        let doc = document();
        assert_eq!(doc.get_str("de.global.username"), Some("Benutzername"));
        assert_eq!(doc.get_str("en.global.username"), Some("Username"));
    }

    #[test]
    fn test_get_str_missing() {
        let doc = document();
        assert_eq!(doc.get_str("de.global.password"), None);
        assert_eq!(doc.get_str("fr.global.username"), None);
    }

    #[test]
    fn test_get_str_rejects_non_strings() {
        let doc = document();
        assert!(doc.get("de.global").is_some());
        assert_eq!(doc.get_str("de.global"), None);
        assert_eq!(doc.get_str("de.count"), None);
    }

    #[test]
    fn test_get_descending_into_scalar() {
        let doc = document();
        assert_eq!(doc.get("de.global.username.more"), None);
    }

    #[test]
    fn test_get_array_index() {
        let doc = document();
        assert_eq!(doc.get_str("de.weekdays.1"), Some("Dienstag"));
        assert_eq!(doc.get_str("de.weekdays.2"), None);
        assert_eq!(doc.get_str("de.weekdays.first"), None);
    }

    #[test]
    fn test_get_escaped_segments() {
        let doc = document();
        assert_eq!(doc.get_str("de.units.km~1h"), Some("Kilometer pro Stunde"));
        assert_eq!(doc.get_str("de.units.a~0b"), Some("Tilde"));
    }

    #[test]
    fn test_languages() {
        let doc = document();
        let mut languages = doc.languages();
        languages.sort_unstable();
        assert_eq!(languages, ["de", "en"]);
    }

    #[test]
    fn test_languages_of_non_object_root() {
        let doc = TranslationDocument::from_slice(b"[1, 2]").expect("valid json");
        assert!(doc.languages().is_empty());
    }

    #[test]
    fn test_from_slice_invalid() {
        assert!(TranslationDocument::from_slice(b"{\"de\": ").is_err());
        assert!(TranslationDocument::from_slice(b"").is_err());
    }
}
