//! Fuzzy string scoring for station name matching.
//!
//! A weighted ratio over normalized Levenshtein similarity, in the shape
//! of the classic fuzzywuzzy `WRatio`: the best of the plain ratio, the
//! token-sort ratio and the token-set ratio (the token variants slightly
//! discounted). Token-set scoring is what lets a short query like
//! "Holborn" score highly against "Holborn Underground Station".

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Score two strings on a 0–100 scale.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let full = ratio(&a, &b);
    let sort = token_sort_ratio(&a, &b);
    let set = token_set_ratio(&a, &b);

    full.max(0.95 * sort).max(0.95 * set)
}

/// Lowercase, drop apostrophes, map other punctuation to spaces.
///
/// Apostrophes are dropped rather than spaced so that "King's" and
/// "Kings" produce the same token.
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_space = true;

    for c in s.chars() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();

    let sect = join(ta.intersection(&tb));
    let diff_a = join(ta.difference(&tb));
    let diff_b = join(tb.difference(&ta));

    let combined_a = concat(&sect, &diff_a);
    let combined_b = concat(&sect, &diff_b);

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a>(iter: impl Iterator<Item = &'a &'a str>) -> String {
    iter.copied().collect::<Vec<_>>().join(" ")
}

fn concat(sect: &str, diff: &str) -> String {
    if sect.is_empty() {
        diff.to_string()
    } else if diff.is_empty() {
        sect.to_string()
    } else {
        format!("{sect} {diff}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(weighted_ratio("Oxford Circus", "Oxford Circus"), 100.0);
    }

    #[test]
    fn case_and_punctuation_insensitive() {
        assert_eq!(
            weighted_ratio("oxford circus", "Oxford  Circus!"),
            100.0
        );
    }

    #[test]
    fn apostrophes_are_dropped() {
        assert_eq!(normalize("King's Cross"), "kings cross");
        assert_eq!(normalize("Kings Cross"), "kings cross");
    }

    #[test]
    fn subset_query_scores_highly() {
        let score = weighted_ratio("Holborn", "Holborn Underground Station");
        assert!(score >= 90.0, "score was {score}");
    }

    #[test]
    fn kings_cross_without_apostrophe_matches() {
        let score = weighted_ratio(
            "Kings Cross",
            "King's Cross St. Pancras Underground Station",
        );
        assert!(score >= 80.0, "score was {score}");
    }

    #[test]
    fn unrelated_names_score_low() {
        let score = weighted_ratio("Narnia Station", "Oval Underground Station");
        assert!(score < 80.0, "score was {score}");
        let score = weighted_ratio(
            "Narnia Station",
            "King's Cross St. Pancras Underground Station",
        );
        assert!(score < 80.0, "score was {score}");
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(weighted_ratio("", "Oval"), 0.0);
        assert_eq!(weighted_ratio("Oval", "  !!  "), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Scores stay on the 0–100 scale.
        #[test]
        fn score_in_range(a in ".{0,40}", b in ".{0,40}") {
            let score = weighted_ratio(&a, &b);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        /// Scoring is symmetric.
        #[test]
        fn symmetric(a in "[a-zA-Z '.]{0,30}", b in "[a-zA-Z '.]{0,30}") {
            let ab = weighted_ratio(&a, &b);
            let ba = weighted_ratio(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-9);
        }
    }
}
