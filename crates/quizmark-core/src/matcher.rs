//! Answer matching heuristics.
//!
//! Learner input is compared with a model answer in one of two ways, chosen
//! by looking at the model answer only:
//!
//! - **Numeric** answers (digits, `.`, `-`, `/`, or anything containing `π`
//!   or `√`) match when one string contains the other, or when both parse as
//!   numbers within [`NUMERIC_TOLERANCE`].
//! - **Prose** answers match on exact equality, or when the learner recalls
//!   at least half of the model's keywords (tokens longer than two chars).
//!
//! Matching is therefore not symmetric: `match_item("x = 5", "5")` is true
//! but `match_item("5", "x = 5")` is false.

use crate::model::AnswerKind;

/// Maximum absolute difference for two numeric answers to be equal.
pub const NUMERIC_TOLERANCE: f64 = 1e-6;

/// Tokens must be longer than this many characters to count as keywords.
pub const MIN_KEYWORD_CHARS: usize = 2;

const PI: char = 'π';
const SQRT: char = '√';

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trim, lowercase, and collapse whitespace runs into a single space.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split(is_space)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decide which matching strategy applies to a normalized model answer.
pub fn classify(model: &str) -> AnswerKind {
    let symbolic = !model.is_empty()
        && model
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '/'));

    if symbolic || model.contains(PI) || model.contains(SQRT) {
        AnswerKind::Numeric
    } else {
        AnswerKind::Prose
    }
}

/// Salient tokens of a normalized model answer.
pub fn keywords(model: &str) -> Vec<&str> {
    model
        .split(' ')
        .filter(|t| t.chars().count() > MIN_KEYWORD_CHARS)
        .collect()
}

/// Keyword hits needed for a prose match: half the keywords, at least one.
pub fn keyword_threshold(keyword_count: usize) -> usize {
    (keyword_count / 2).max(1)
}

/// Whether a learner's raw answer matches a raw model answer.
///
/// Blank input on either side never matches.
pub fn match_item(user_raw: &str, model_raw: &str) -> bool {
    let user = normalize(user_raw);
    let model = normalize(model_raw);
    if user.is_empty() || model.is_empty() {
        return false;
    }

    match classify(&model) {
        AnswerKind::Numeric => numeric_match(&user, &model),
        AnswerKind::Prose => prose_match(&user, &model),
    }
}

fn numeric_match(user: &str, model: &str) -> bool {
    if user.contains(model) || model.contains(user) {
        return true;
    }

    // Whole-string parse: "1/2" is not read as 1.
    match (user.parse::<f64>(), model.parse::<f64>()) {
        (Ok(u), Ok(m)) => (u - m).abs() < NUMERIC_TOLERANCE,
        _ => false,
    }
}

fn prose_match(user: &str, model: &str) -> bool {
    if user == model {
        return true;
    }

    let tokens = keywords(model);
    let hits = tokens.iter().filter(|t| user.contains(*t)).count();
    hits >= keyword_threshold(tokens.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_and_whitespace_insensitive() {
        assert_eq!(normalize("  Gst "), normalize("GST"));
        assert_eq!(normalize("  Sample \t\n  SPACE "), "sample space");
        assert_eq!(normalize("\u{FEFF}subset\u{00A0}"), "subset");
    }

    #[test]
    fn normalize_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["  A  b\tC ", "πR²", " (a ∪ b)' = a' ∩ b' ", "", "x = 5"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn classify_numeric_and_symbolic() {
        assert_eq!(classify("1/2"), AnswerKind::Numeric);
        assert_eq!(classify("-0.5"), AnswerKind::Numeric);
        assert_eq!(classify("0.02"), AnswerKind::Numeric);
        assert_eq!(classify("πr²"), AnswerKind::Numeric);
        assert_eq!(classify("2√3"), AnswerKind::Numeric);
    }

    #[test]
    fn classify_prose() {
        assert_eq!(classify("sample space"), AnswerKind::Prose);
        assert_eq!(classify("x² + 6x + 9"), AnswerKind::Prose);
        assert_eq!(classify("d1 × d2 / 2"), AnswerKind::Prose);
        assert_eq!(classify("1 / 2"), AnswerKind::Prose);
        assert_eq!(classify(""), AnswerKind::Prose);
    }

    #[test]
    fn keywords_drop_short_tokens() {
        assert_eq!(
            keywords("a set is a well-defined collection"),
            vec!["set", "well-defined", "collection"]
        );
        assert!(keywords("a² + b² = c²").is_empty());
        assert_eq!(keyword_threshold(0), 1);
        assert_eq!(keyword_threshold(3), 1);
        assert_eq!(keyword_threshold(5), 2);
    }

    #[test]
    fn blank_answers_never_match() {
        assert!(!match_item("", "5"));
        assert!(!match_item("   ", "5"));
        assert!(!match_item("5", ""));
        assert!(!match_item("", ""));
    }

    #[test]
    fn numeric_substring_leniency() {
        assert!(match_item("x = 5", "5"));
        assert!(match_item("x=5", "5"));
        assert!(match_item("0.020", "0.02"));
        assert!(match_item("πr² cm²", "πr²"));
    }

    #[test]
    fn numeric_tolerance() {
        assert!(match_item("0.1250001", "0.125"));
        assert!(match_item(".50", "0.5"));
        assert!(match_item("2e-2", "0.02"));
        assert!(!match_item("0.2", "0.125"));
        assert!(!match_item("pi r squared", "πr²"));
    }

    #[test]
    fn fractions_are_not_parsed_as_prefixes() {
        assert!(!match_item("1/2", "1/3"));
        assert!(!match_item("1/2", "0.5"));
    }

    #[test]
    fn numbers_with_units_need_the_model_digits() {
        // The whole answer must parse for the tolerance rule to apply.
        assert!(!match_item(".5 cm", "0.5"));
        assert!(match_item("0.5 cm", "0.5"));
        assert!(!match_item("3 apples", "3.0"));
    }

    #[test]
    fn matching_is_asymmetric() {
        // Model "5" is numeric, so the substring rule applies.
        assert!(match_item("x = 5", "5"));
        // Model "x = 5" is prose with no keywords, so only exact recall counts.
        assert!(!match_item("5", "x = 5"));
    }

    #[test]
    fn prose_keyword_threshold() {
        assert!(match_item("the sample of outcomes", "sample space"));
        assert!(!match_item("nothing relevant", "sample space"));
        assert!(match_item("Sample  Space", "sample space"));
        assert!(match_item("subsets", "subset"));

        let definition = "a set is a well-defined collection of distinct objects";
        assert!(match_item("collection of objects", definition));
        assert!(!match_item("a collection", definition));
        assert!(!match_item("a group of things", definition));
    }

    #[test]
    fn degenerate_prose_requires_exact_recall() {
        assert!(match_item("A² + B² = C²", "a² + b² = c²"));
        assert!(!match_item("a² + b² = c² indeed", "a² + b² = c²"));
        assert!(!match_item("c²", "a² + b² = c²"));
    }
}
