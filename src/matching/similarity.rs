use strsim::normalized_levenshtein;

use crate::normalization::NameNormalizer;

/// Partial (best-window) matches are less reliable than full-string
/// equality, so they are penalized to avoid false positives on generic
/// name fragments like "串" or "麻辣".
pub const PARTIAL_WEIGHT: f64 = 0.90;
/// Token-sort matches are penalized a little more than partial matches.
pub const TOKEN_SORT_WEIGHT: f64 = 0.85;
/// Literal-substring containment sits between the two.
pub const CONTAINMENT_WEIGHT: f64 = 0.88;

/// Blended fuzzy-match confidence between two restaurant names.
///
/// Both names are normalized first; the score is the best of four weighted
/// strategies. The blend is not symmetric in general — callers must not
/// assume `score(a, b) == score(b, a)`.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    normalizer: NameNormalizer,
}

impl SimilarityScorer {
    pub fn new(normalizer: NameNormalizer) -> Self {
        Self { normalizer }
    }

    /// Returns a confidence in [0, 1]. 1.0 only on exact normalized
    /// equality, 0.0 when either side normalizes to empty.
    pub fn score(&self, name_a: &str, name_b: &str) -> f64 {
        let a = self.normalizer.normalize(name_a);
        let b = self.normalizer.normalize(name_b);

        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }

        let exact = normalized_levenshtein(&a, &b);
        let partial = partial_ratio(&a, &b) * PARTIAL_WEIGHT;
        let token_sort = token_sort_ratio(&a, &b) * TOKEN_SORT_WEIGHT;
        let containment = containment_ratio(&a, &b) * CONTAINMENT_WEIGHT;

        exact
            .max(partial)
            .max(token_sort)
            .max(containment)
            .clamp(0.0, 1.0)
    }
}

/// Best similarity of the shorter string against every equal-length char
/// window of the longer one. Handles one name being a prefix/suffix/infix
/// of the other. Operates on chars, not bytes.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };
    if short.is_empty() {
        return 0.0;
    }
    if short.len() == long.len() {
        let short_s: String = short.iter().collect();
        let long_s: String = long.iter().collect();
        return normalized_levenshtein(&short_s, &long_s);
    }

    let needle: String = short.iter().collect();
    let mut best = 0.0_f64;
    for start in 0..=(long.len() - short.len()) {
        let window: String = long[start..start + short.len()].iter().collect();
        let score = normalized_levenshtein(&needle, &window);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }
    best
}

/// Similarity after sorting whitespace-delimited tokens, so word order
/// differences in mixed-script names do not hurt the score.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// `len(shorter) / len(longer)` when one name is a literal substring of the
/// other, 0 otherwise. Char counts, guarded against empty strings.
fn containment_ratio(a: &str, b: &str) -> f64 {
    if !(a.contains(b) || b.contains(a)) {
        return 0.0;
    }
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longer = len_a.max(len_b);
    if longer == 0 {
        return 0.0;
    }
    len_a.min(len_b) as f64 / longer as f64
}
