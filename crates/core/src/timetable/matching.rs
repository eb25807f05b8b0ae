//! Fuzzy text matching used to search cached category listings.
//!
//! The resolution layer only depends on the [`Matcher`] trait: given a query
//! and a list of candidate strings, return the indices of the candidates that
//! score at or above a threshold, best match first.

use super::types::CategoryItem;

/// Default minimum similarity score (out of 100) for a candidate to match.
pub const DEFAULT_SCORE_CUTOFF: f64 = 80.0;

/// Ranks candidate strings against a query.
pub trait Matcher: Send + Sync {
    /// Returns indices into `choices` scoring at or above the cutoff,
    /// best first, ties in input order, at most `limit` when given.
    fn extract(&self, query: &str, choices: &[&str], limit: Option<usize>) -> Vec<usize>;
}

/// Partial-ratio matcher: the best normalised Indel similarity between the
/// shorter string and any equally long window of the longer one.
#[derive(Debug, Clone, Copy)]
pub struct PartialRatioMatcher {
    score_cutoff: f64,
}

impl PartialRatioMatcher {
    pub fn new(score_cutoff: f64) -> Self {
        Self { score_cutoff }
    }
}

impl Default for PartialRatioMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_CUTOFF)
    }
}

impl Matcher for PartialRatioMatcher {
    fn extract(&self, query: &str, choices: &[&str], limit: Option<usize>) -> Vec<usize> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = choices
            .iter()
            .enumerate()
            .map(|(idx, choice)| (idx, partial_ratio(&query, &normalize(choice))))
            .filter(|(_, score)| *score >= self.score_cutoff)
            .collect();

        // Stable sort keeps input order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let iter = scored.into_iter().map(|(idx, _)| idx);
        match limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        }
    }
}

/// Filters category items by name, best match first.
pub fn filter_items_by_name(
    matcher: &dyn Matcher,
    items: &[CategoryItem],
    query: &str,
    limit: Option<usize>,
) -> Vec<CategoryItem> {
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    matcher
        .extract(query, &names, limit)
        .into_iter()
        .map(|idx| items[idx].clone())
        .collect()
}

/// Lower-cases, replaces non-alphanumeric characters with spaces and trims.
fn normalize(s: &str) -> Vec<char> {
    let replaced: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();
    replaced.trim().chars().collect()
}

/// Similarity in `0.0..=100.0`.
fn partial_ratio(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        let score = ratio(short, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// Normalised Indel similarity: `2 * LCS / (|a| + |b|)`, scaled to 100.
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * longest_common_subsequence(a, b) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::CategoryType;
    use uuid::Uuid;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_lcs() {
        assert_eq!(longest_common_subsequence(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(longest_common_subsequence(&chars("abc"), &chars("xyz")), 0);
    }

    #[test]
    fn test_partial_ratio_substring_is_perfect() {
        let score = partial_ratio(
            &normalize("CSC1003"),
            &normalize("CSC1003[1] Computer Programming I"),
        );
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_partial_ratio_unrelated_is_low() {
        let score = partial_ratio(&normalize("CSC1003"), &normalize("Organic Chemistry"));
        assert!(score < DEFAULT_SCORE_CUTOFF, "score was {}", score);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" CSC1003[1] "), chars("csc1003 1"));
    }

    #[test]
    fn test_extract_orders_best_first() {
        let matcher = PartialRatioMatcher::default();
        let choices = [
            "CSC1004[1] Computer Programming II",
            "HIS1080[2] Irish History",
            "CSC1003[1] Computer Programming I",
        ];

        let matches = matcher.extract("CSC1003", &choices, None);

        assert_eq!(matches.first(), Some(&2));
        assert!(!matches.contains(&1));
    }

    #[test]
    fn test_extract_respects_limit() {
        let matcher = PartialRatioMatcher::default();
        let choices = ["CSC1003 A", "CSC1003 B", "CSC1003 C"];

        assert_eq!(matcher.extract("csc1003", &choices, Some(2)), vec![0, 1]);
        assert_eq!(matcher.extract("csc1003", &choices, None).len(), 3);
    }

    #[test]
    fn test_extract_empty_query_matches_nothing() {
        let matcher = PartialRatioMatcher::default();
        assert!(matcher.extract("  ", &["anything"], None).is_empty());
    }

    #[test]
    fn test_filter_items_by_name() {
        let items = vec![
            CategoryItem::new(Uuid::from_u128(1), CategoryType::Modules, "MTH1025[1] Calculus"),
            CategoryItem::new(
                Uuid::from_u128(2),
                CategoryType::Modules,
                "CSC1003[1] Computer Programming I",
            ),
        ];

        let filtered = filter_items_by_name(&PartialRatioMatcher::default(), &items, "CSC1003", Some(1));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].identity, Uuid::from_u128(2));
    }
}
