//! `Accept-Language` header parsing.
//!
//! Turns a raw header value such as `"fr;q=0.2,de-AT;q=0.8,de"` into a list of
//! [`LanguagePreference`] entries ranked by quality. Parsing never fails:
//! malformed quality values degrade to `0.0` and segments without a language
//! tag are dropped.

use serde::Serialize;

/// A single ranked entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguagePreference {
    /// Raw language tag as sent by the client (e.g., "de-AT", "*")
    pub tag: String,

    /// Primary subtag, the part before the first `-` (e.g., "de")
    pub base: String,

    /// Second `-`-delimited subtag (e.g., "AT"), empty when the tag has none
    pub region: String,

    /// Preference weight, 1.0 when the client sent no `q` parameter
    pub quality: f64,
}

impl LanguagePreference {
    /// Build a preference from one trimmed header segment.
    ///
    /// Returns `None` when the segment has no language tag (e.g., ";q=0.5").
    fn from_segment(segment: &str) -> Option<Self> {
        let (tag, quality) = match segment.split_once(';') {
            Some((tag, params)) => (tag, parse_quality(params)),
            None => (segment, 1.0),
        };

        if tag.is_empty() {
            return None;
        }

        let mut subtags = tag.split('-');
        let base = subtags.next().unwrap_or(tag);
        let region = subtags.next().unwrap_or("");

        Some(Self {
            tag: tag.to_string(),
            base: base.to_string(),
            region: region.to_string(),
            quality,
        })
    }
}

/// Parse an `Accept-Language` header into preferences sorted by quality, highest first.
///
/// Entries with equal quality keep the order in which they appeared in the header.
///
/// # Example
/// ```
/// use json_i18n::i18n::parse_accept_language;
///
/// let prefs = parse_accept_language("fr;q=0.2,de-AT;q=0.8,de");
/// let tags: Vec<_> = prefs.iter().map(|p| p.tag.as_str()).collect();
/// assert_eq!(tags, ["de", "de-AT", "fr"]);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .map(|segment| segment.trim_matches(' '))
        .filter_map(LanguagePreference::from_segment)
        .collect();

    // Vec::sort_by is stable, ties keep header order
    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));

    preferences
}

/// Extract the base language from a preference, recomputed from its tag.
pub fn base_language(preference: &LanguagePreference) -> &str {
    preference
        .tag
        .split_once('-')
        .map_or(preference.tag.as_str(), |(base, _)| base)
}

/// Quality parameter (`q=0.8`) to its numeric weight.
///
/// A parameter without `=` or with a non-numeric value weighs 0.0. Only the
/// text between the first and second `=` is read.
fn parse_quality(params: &str) -> f64 {
    let quality = params
        .split('=')
        .nth(1)
        .and_then(|value| value.trim_matches(' ').parse::<f64>().ok())
        .unwrap_or(0.0);

    // -0.0 must tie with 0.0 under total_cmp
    quality + 0.0
}
