//! Language tag normalization and matching.
//!
//! Tags are compared after normalization: lower-case, `-` separated, with
//! ISO 639-2 primary subtags folded to their ISO 639-1 form where one
//! exists (`"eng"` and `"en"` compare equal).

/// The tag for content whose language is undetermined.
pub const LANGUAGE_UNDETERMINED: &str = "und";

/// Exact match.
pub const SCORE_EXACT: u8 = 4;
/// One tag is a prefix of the other (`"en"` vs `"en-us"`).
pub const SCORE_PREFIX: u8 = 3;
/// Same primary subtag (`"en-gb"` vs `"en-us"`).
pub const SCORE_PRIMARY_SUBTAG: u8 = 2;
/// The format's language is undetermined and the caller allows that.
pub const SCORE_UNDETERMINED: u8 = 1;

/// ISO 639-2 (bibliographic and terminologic) to ISO 639-1, plus legacy
/// two-letter codes.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("ara", "ar"),
    ("baq", "eu"),
    ("ben", "bn"),
    ("bul", "bg"),
    ("cat", "ca"),
    ("ces", "cs"),
    ("chi", "zh"),
    ("cze", "cs"),
    ("dan", "da"),
    ("deu", "de"),
    ("dut", "nl"),
    ("ell", "el"),
    ("eng", "en"),
    ("est", "et"),
    ("eus", "eu"),
    ("fas", "fa"),
    ("fin", "fi"),
    ("fra", "fr"),
    ("fre", "fr"),
    ("ger", "de"),
    ("glg", "gl"),
    ("gre", "el"),
    ("heb", "he"),
    ("hin", "hi"),
    ("hrv", "hr"),
    ("hun", "hu"),
    ("ice", "is"),
    ("in", "id"),
    ("ind", "id"),
    ("isl", "is"),
    ("ita", "it"),
    ("iw", "he"),
    ("ji", "yi"),
    ("jpn", "ja"),
    ("kor", "ko"),
    ("lav", "lv"),
    ("lit", "lt"),
    ("may", "ms"),
    ("msa", "ms"),
    ("nld", "nl"),
    ("nno", "nn"),
    ("nob", "nb"),
    ("nor", "no"),
    ("per", "fa"),
    ("pol", "pl"),
    ("por", "pt"),
    ("ron", "ro"),
    ("rum", "ro"),
    ("rus", "ru"),
    ("slk", "sk"),
    ("slo", "sk"),
    ("slv", "sl"),
    ("spa", "es"),
    ("srp", "sr"),
    ("swe", "sv"),
    ("tam", "ta"),
    ("tel", "te"),
    ("tha", "th"),
    ("tur", "tr"),
    ("ukr", "uk"),
    ("urd", "ur"),
    ("vie", "vi"),
    ("yid", "yi"),
    ("zho", "zh"),
];

/// Normalize a language tag.
///
/// ```
/// use tp_core::language::normalize_language_code;
///
/// assert_eq!(normalize_language_code("ENG"), "en");
/// assert_eq!(normalize_language_code("pt_BR"), "pt-br");
/// assert_eq!(normalize_language_code("fre-CA"), "fr-ca");
/// ```
pub fn normalize_language_code(language: &str) -> String {
    let lower = language.trim().to_ascii_lowercase().replace('_', "-");
    if lower.is_empty() || lower == LANGUAGE_UNDETERMINED {
        return lower;
    }
    let (primary, rest) = match lower.split_once('-') {
        Some((primary, rest)) => (primary, Some(rest)),
        None => (lower.as_str(), None),
    };
    let primary = LANGUAGE_ALIASES
        .binary_search_by(|(alias, _)| alias.cmp(&primary))
        .map(|i| LANGUAGE_ALIASES[i].1)
        .unwrap_or(primary);
    match rest {
        Some(rest) => format!("{primary}-{rest}"),
        None => primary.to_string(),
    }
}

/// Map an empty or undetermined language to `None`.
pub fn normalize_undetermined(language: Option<&str>) -> Option<&str> {
    language.filter(|l| !l.is_empty() && *l != LANGUAGE_UNDETERMINED)
}

/// Score how well a format's language matches a query language.
///
/// Returns [`SCORE_EXACT`], [`SCORE_PREFIX`], [`SCORE_PRIMARY_SUBTAG`],
/// [`SCORE_UNDETERMINED`] (only when `allow_undetermined_format_language` and
/// the format language is undetermined) or 0.
pub fn language_match_score(
    format_language: Option<&str>,
    query: Option<&str>,
    allow_undetermined_format_language: bool,
) -> u8 {
    if let Some(q) = query {
        if !q.is_empty() && Some(q) == format_language {
            return SCORE_EXACT;
        }
    }
    let query = normalize_undetermined(query);
    let format_language = normalize_undetermined(format_language);
    let (Some(format_language), Some(query)) = (format_language, query) else {
        return if allow_undetermined_format_language && format_language.is_none() {
            SCORE_UNDETERMINED
        } else {
            0
        };
    };
    if format_language.starts_with(query) || query.starts_with(format_language) {
        return SCORE_PREFIX;
    }
    if primary_subtag(format_language) == primary_subtag(query) {
        return SCORE_PRIMARY_SUBTAG;
    }
    0
}

fn primary_subtag(language: &str) -> &str {
    language.split('-').next().unwrap_or(language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_sorted_for_binary_search() {
        assert!(LANGUAGE_ALIASES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn normalizes_three_letter_codes() {
        assert_eq!(normalize_language_code("eng"), "en");
        assert_eq!(normalize_language_code("ger"), "de");
        assert_eq!(normalize_language_code("deu"), "de");
        assert_eq!(normalize_language_code("iw"), "he");
        assert_eq!(normalize_language_code("und"), "und");
        assert_eq!(normalize_language_code("fil"), "fil");
        assert_eq!(normalize_language_code("zh_Hant_TW"), "zh-hant-tw");
    }

    #[test]
    fn undetermined_maps_to_none() {
        assert_eq!(normalize_undetermined(Some("und")), None);
        assert_eq!(normalize_undetermined(Some("")), None);
        assert_eq!(normalize_undetermined(None), None);
        assert_eq!(normalize_undetermined(Some("en")), Some("en"));
    }

    #[test]
    fn scores_exact_prefix_and_primary() {
        assert_eq!(language_match_score(Some("en"), Some("en"), false), SCORE_EXACT);
        assert_eq!(language_match_score(Some("en-us"), Some("en"), false), SCORE_PREFIX);
        assert_eq!(language_match_score(Some("en"), Some("en-us"), false), SCORE_PREFIX);
        assert_eq!(
            language_match_score(Some("en-gb"), Some("en-us"), false),
            SCORE_PRIMARY_SUBTAG
        );
        assert_eq!(language_match_score(Some("de"), Some("en"), false), 0);
    }

    #[test]
    fn scores_undetermined_format_language() {
        assert_eq!(language_match_score(None, Some("en"), false), 0);
        assert_eq!(language_match_score(None, Some("en"), true), SCORE_UNDETERMINED);
        assert_eq!(language_match_score(Some("und"), None, true), SCORE_UNDETERMINED);
        assert_eq!(language_match_score(Some("en"), None, true), 0);
    }

    #[test]
    fn identical_undetermined_tags_are_exact() {
        assert_eq!(language_match_score(Some("und"), Some("und"), false), SCORE_EXACT);
    }
}
