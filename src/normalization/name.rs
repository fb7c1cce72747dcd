use regex::Regex;

/// Canonicalizes restaurant names before comparison.
///
/// Normalization steps:
/// - trim surrounding whitespace
/// - drop parenthetical annotations `(...)` / `（...）` (branch/alias notes)
/// - drop a trailing district token, optionally followed by a branch-type
///   suffix (店/分店/旗舰店/总店)
/// - collapse internal whitespace and separator punctuation (·、・、-、—)
///
/// Stripping repeats until the string stops changing, so the output is
/// stable under re-normalization. Output length never exceeds input length.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    chain_suffixes: Regex,
    separators: Regex,
}

impl NameNormalizer {
    /// Build a normalizer over a closed set of district tokens.
    pub fn new<S: AsRef<str>>(districts: &[S]) -> Self {
        let alternation = districts
            .iter()
            .map(|d| regex::escape(d.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        // District tokens are escaped literals, so the pattern is valid by
        // construction for any district list.
        let chain_suffixes = if alternation.is_empty() {
            Regex::new(r"[（(].{0,10}[)）]")
        } else {
            Regex::new(&format!(
                r"[（(].{{0,10}}[)）]|({alternation})(店|分店|旗舰店|总店)?$"
            ))
        }
        .expect("suffix pattern built from escaped literals");
        let separators = Regex::new(r"[\s·・\-—]+").expect("separator pattern is static");

        Self {
            chain_suffixes,
            separators,
        }
    }

    /// Pure and deterministic; may return an empty string when the input
    /// was nothing but suffix and punctuation.
    pub fn normalize(&self, raw: &str) -> String {
        let mut name = raw.trim().to_string();
        loop {
            let pass = self.strip_once(&name);
            if pass == name {
                return name;
            }
            name = pass;
        }
    }

    fn strip_once(&self, name: &str) -> String {
        let stripped = self.chain_suffixes.replace_all(name, "");
        self.separators
            .replace_all(stripped.trim(), "")
            .into_owned()
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(&crate::config::DEFAULT_DISTRICTS)
    }
}
